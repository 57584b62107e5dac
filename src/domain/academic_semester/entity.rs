//! Academic semester entity

use serde::{Deserialize, Serialize};

use crate::domain::storage::{ObjectId, StorageEntity};

/// Semester name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterTitle {
    Autumn,
    Summer,
    Fall,
}

/// Semester code as used in student ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterCode {
    #[serde(rename = "01")]
    First,
    #[serde(rename = "02")]
    Second,
    #[serde(rename = "03")]
    Third,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Academic semester, persisted exactly as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSemester {
    pub title: SemesterTitle,
    pub year: String,
    pub code: SemesterCode,
    pub start_month: Month,
    pub end_month: Month,
}

impl StorageEntity for AcademicSemester {
    type Key = ObjectId;

    fn unique_key(&self) -> Option<&Self::Key> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_semester_wire_format() {
        let semester: AcademicSemester = serde_json::from_value(json!({
            "title": "Autumn",
            "year": "2025",
            "code": "01",
            "startMonth": "January",
            "endMonth": "May"
        }))
        .unwrap();

        assert_eq!(semester.title, SemesterTitle::Autumn);
        assert_eq!(semester.code, SemesterCode::First);
        assert_eq!(semester.start_month, Month::January);
        assert_eq!(semester.end_month, Month::May);

        let json = serde_json::to_value(&semester).unwrap();
        assert_eq!(json["code"], "01");
        assert_eq!(json["startMonth"], "January");
    }

    #[test]
    fn test_unknown_title_rejected() {
        let result: Result<AcademicSemester, _> = serde_json::from_value(json!({
            "title": "Winter",
            "year": "2025",
            "code": "01",
            "startMonth": "January",
            "endMonth": "May"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_no_unique_index() {
        let semester = AcademicSemester {
            title: SemesterTitle::Fall,
            year: "2025".to_string(),
            code: SemesterCode::Third,
            start_month: Month::September,
            end_month: Month::December,
        };

        assert!(semester.unique_key().is_none());
    }
}
