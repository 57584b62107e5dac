//! Password hashing using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::domain::user::{PasswordHash, PasswordHasher};
use crate::domain::DomainError;

/// Default Argon2 time cost (iterations)
pub const DEFAULT_HASH_COST: u32 = Params::DEFAULT_T_COST;

/// Argon2id password hasher with an explicit work factor
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    cost: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl Argon2Hasher {
    /// Create a hasher using `cost` Argon2 iterations per hash
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    fn argon2(&self) -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| {
            DomainError::configuration(format!("Invalid password hash cost {}: {}", self.cost, e))
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::from_phc(hash.to_string()))
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        let parsed_hash = match PhcString::new(hash.as_str()) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Parameters come from the stored hash, so hashes made with another cost still verify
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
