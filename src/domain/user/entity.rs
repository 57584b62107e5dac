//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::validation::{validate_user_id, UserValidationError};
use crate::domain::storage::{ObjectId, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Business identifier of a user, unique across the users collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role of a user within the university
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Faculty,
    Admin,
}

impl UserRole {
    /// Name of the profile reference field that belongs to this role
    pub fn profile_field(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile_field())
    }
}

/// Weak reference to the `_id` of a profile document in a sibling collection.
///
/// Hyphenated ids are accepted and normalized to the store's own form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileRef(ObjectId);

impl ProfileRef {
    pub fn new(id: ObjectId) -> Self {
        Self(id)
    }
}

impl TryFrom<String> for ProfileRef {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ObjectId::parse(&value).map(Self)
    }
}

impl From<ProfileRef> for String {
    fn from(reference: ProfileRef) -> Self {
        reference.0.as_str().to_string()
    }
}

/// A user's role together with the profile reference that role may carry.
///
/// Serialized flat as `{ "role": "...", "<role>": "<uuid>" }`, so a stored record
/// can only ever hold the reference field that matches its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Student {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student: Option<ProfileRef>,
    },
    Faculty {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        faculty: Option<ProfileRef>,
    },
    Admin {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        admin: Option<ProfileRef>,
    },
}

impl RoleProfile {
    /// Role without a linked profile
    pub fn unlinked(role: UserRole) -> Self {
        match role {
            UserRole::Student => Self::Student { student: None },
            UserRole::Faculty => Self::Faculty { faculty: None },
            UserRole::Admin => Self::Admin { admin: None },
        }
    }

    /// Builds the profile from a role and the loose reference fields of a request.
    ///
    /// At most one reference may be given and it must be the one named after the role.
    pub fn resolve(
        role: UserRole,
        student: Option<ProfileRef>,
        faculty: Option<ProfileRef>,
        admin: Option<ProfileRef>,
    ) -> Result<Self, UserValidationError> {
        let supplied = [("student", student), ("faculty", faculty), ("admin", admin)];

        if supplied.iter().filter(|(_, r)| r.is_some()).count() > 1 {
            return Err(UserValidationError::MultipleProfiles);
        }

        if let Some((field, _)) = supplied
            .iter()
            .find(|(field, r)| r.is_some() && *field != role.profile_field())
        {
            return Err(UserValidationError::MismatchedProfile {
                field: *field,
                role,
            });
        }

        let [(_, student), (_, faculty), (_, admin)] = supplied;

        Ok(match role {
            UserRole::Student => Self::Student { student },
            UserRole::Faculty => Self::Faculty { faculty },
            UserRole::Admin => Self::Admin { admin },
        })
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::Student { .. } => UserRole::Student,
            Self::Faculty { .. } => UserRole::Faculty,
            Self::Admin { .. } => UserRole::Admin,
        }
    }

    pub fn profile_ref(&self) -> Option<&ProfileRef> {
        match self {
            Self::Student { student } => student.as_ref(),
            Self::Faculty { faculty } => faculty.as_ref(),
            Self::Admin { admin } => admin.as_ref(),
        }
    }
}

/// Argon2 PHC string of a user's password.
///
/// Only a password hasher (or a storage read) produces one, so plaintext cannot be
/// stored in its place.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub(crate) fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// User identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: RoleProfile,
    password: PasswordHash,
    needs_password_change: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_changed_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user from an already hashed password.
    ///
    /// A user that does not need to change its password is stamped with the
    /// current time as the moment the password was last changed.
    pub fn new(
        id: UserId,
        profile: RoleProfile,
        password: PasswordHash,
        needs_password_change: bool,
    ) -> Self {
        let password_changed_at = (!needs_password_change).then(Utc::now);

        Self {
            id,
            profile,
            password,
            needs_password_change,
            password_changed_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub fn needs_password_change(&self) -> bool {
        self.needs_password_change
    }

    pub fn password_changed_at(&self) -> Option<DateTime<Utc>> {
        self.password_changed_at
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn unique_key(&self) -> Option<&Self::Key> {
        Some(&self.id)
    }
}

/// Fields read when looking up a user's credentials
pub const CREDENTIAL_FIELDS: [&str; 4] = ["id", "password", "needsPasswordChange", "role"];

/// Credential projection of a user record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredentials {
    pub id: UserId,
    pub password: PasswordHash,
    pub needs_password_change: bool,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_ref() -> ProfileRef {
        ProfileRef::new(ObjectId::generate())
    }

    fn hash() -> PasswordHash {
        PasswordHash::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string())
    }

    #[test]
    fn test_user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert_eq!(UserId::new("U1").unwrap().as_str(), "U1");
    }

    #[test]
    fn test_user_id_deserialization_validates() {
        let result: Result<UserId, _> = serde_json::from_value(json!(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_role_profile_resolve_matching() {
        let r = profile_ref();
        let profile = RoleProfile::resolve(UserRole::Faculty, None, Some(r.clone()), None).unwrap();

        assert_eq!(profile.role(), UserRole::Faculty);
        assert_eq!(profile.profile_ref(), Some(&r));
    }

    #[test]
    fn test_profile_ref_uses_object_id_form() {
        let id = ObjectId::generate();
        let from_store: ProfileRef = serde_json::from_value(json!(id.as_str())).unwrap();
        assert_eq!(serde_json::to_value(&from_store).unwrap(), json!(id.as_str()));

        let hyphenated: ProfileRef =
            serde_json::from_value(json!("67e55044-10b1-426f-9247-bb680e5fe0c8")).unwrap();
        assert_eq!(
            serde_json::to_value(&hyphenated).unwrap(),
            json!("67e5504410b1426f9247bb680e5fe0c8")
        );

        let invalid: Result<ProfileRef, _> = serde_json::from_value(json!("not-a-profile"));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_role_profile_resolve_without_reference() {
        let profile = RoleProfile::resolve(UserRole::Admin, None, None, None).unwrap();
        assert_eq!(profile, RoleProfile::unlinked(UserRole::Admin));
        assert!(profile.profile_ref().is_none());
    }

    #[test]
    fn test_role_profile_resolve_mismatch() {
        let err = RoleProfile::resolve(UserRole::Student, None, Some(profile_ref()), None)
            .unwrap_err();

        assert_eq!(
            err,
            UserValidationError::MismatchedProfile {
                field: "faculty",
                role: UserRole::Student
            }
        );
    }

    #[test]
    fn test_role_profile_resolve_multiple() {
        let err = RoleProfile::resolve(
            UserRole::Student,
            Some(profile_ref()),
            Some(profile_ref()),
            None,
        )
        .unwrap_err();

        assert_eq!(err, UserValidationError::MultipleProfiles);
    }

    #[test]
    fn test_new_user_needing_password_change() {
        let user = User::new(
            UserId::new("U1").unwrap(),
            RoleProfile::unlinked(UserRole::Student),
            hash(),
            true,
        );

        assert!(user.needs_password_change());
        assert!(user.password_changed_at().is_none());
    }

    #[test]
    fn test_new_user_with_settled_password() {
        let before = Utc::now();
        let user = User::new(
            UserId::new("U2").unwrap(),
            RoleProfile::unlinked(UserRole::Admin),
            hash(),
            false,
        );

        let changed_at = user.password_changed_at().unwrap();
        assert!(changed_at >= before);
        assert!(changed_at <= Utc::now());
    }

    #[test]
    fn test_user_serialized_shape() {
        let r = profile_ref();
        let user = User::new(
            UserId::new("U1").unwrap(),
            RoleProfile::Student {
                student: Some(r.clone()),
            },
            hash(),
            true,
        );

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], "U1");
        assert_eq!(json["role"], "student");
        assert_eq!(json["student"], String::from(r));
        assert_eq!(json["needsPasswordChange"], true);
        assert!(json["password"].as_str().unwrap().starts_with("$argon2id$"));
        assert!(json.get("passwordChangedAt").is_none());
        assert!(json.get("faculty").is_none());
    }

    #[test]
    fn test_user_round_trips_through_storage_shape() {
        let user = User::new(
            UserId::new("U3").unwrap(),
            RoleProfile::Faculty {
                faculty: Some(profile_ref()),
            },
            hash(),
            false,
        );

        let restored: User = serde_json::from_value(serde_json::to_value(&user).unwrap()).unwrap();

        assert_eq!(restored.id(), user.id());
        assert_eq!(restored.profile(), user.profile());
        assert_eq!(restored.password(), user.password());
        assert_eq!(restored.password_changed_at(), user.password_changed_at());
    }

    #[test]
    fn test_stored_record_with_foreign_reference_is_ignored() {
        let json = json!({
            "id": "U4",
            "role": "student",
            "admin": ObjectId::generate().to_string(),
            "password": "$argon2id$...",
            "needsPasswordChange": true
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.profile(), &RoleProfile::Student { student: None });
    }

    #[test]
    fn test_credentials_from_projection() {
        let credentials: UserCredentials = serde_json::from_value(json!({
            "id": "U1",
            "password": "$argon2id$abc",
            "needsPasswordChange": false,
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(credentials.id.as_str(), "U1");
        assert_eq!(credentials.password.as_str(), "$argon2id$abc");
        assert!(!credentials.needs_password_change);
        assert_eq!(credentials.role, UserRole::Admin);
    }

    #[test]
    fn test_password_hash_debug_is_redacted() {
        let debug = format!("{:?}", hash());
        assert!(!debug.contains("argon2"));
    }
}
