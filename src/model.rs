use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DbError;

/// One row of the `students` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Student {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: Option<NaiveDate>,
}

/// Insert payload for a new student; `student_id` is generated by the
/// database.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: Option<NaiveDate>,
}

/// Validates an `--date` argument before it reaches the database. Empty
/// means the enrollment date is unknown and stores NULL.
pub fn parse_enrollment_date(raw: &str) -> Result<Option<NaiveDate>, DbError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DbError::InvalidInput("enrollment_date must be YYYY-MM-DD".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enrollment_date_valid() {
        let date = parse_enrollment_date("2024-09-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 9, 1));
    }

    #[test]
    fn test_parse_enrollment_date_empty_is_none() {
        assert!(parse_enrollment_date("").unwrap().is_none());
    }

    #[test]
    fn test_parse_enrollment_date_rejects_other_formats() {
        for raw in ["2024/09/01", "09-01-2024", "not-a-date", "2024-13-01"] {
            match parse_enrollment_date(raw) {
                Err(DbError::InvalidInput(msg)) => assert!(msg.contains("YYYY-MM-DD")),
                other => panic!("expected InvalidInput for {raw:?}, got {other:?}"),
            }
        }
    }
}
