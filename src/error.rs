use std::fmt;

#[derive(Debug)]
pub enum DbError {
    InvalidInput(String),
    ConnectionError(sqlx::Error),
    UniqueViolation,
    SqlError(sqlx::Error),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            DbError::ConnectionError(e) => write!(f, "Connection error: {e}"),
            DbError::UniqueViolation => write!(f, "Unique constraint violation"),
            DbError::SqlError(e) => write!(f, "SQL error: {e}"),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::ConnectionError(e) | DbError::SqlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        // Classify unique-constraint failures structurally so callers can
        // branch on the variant instead of inspecting error strings.
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return DbError::UniqueViolation;
            }
        }
        DbError::SqlError(e)
    }
}
