pub mod repository;
pub mod seed;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

/// Failures from the patient record store.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Unrecognised {field} value in record: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Schema migration {version} failed: {reason}")]
    MigrationFailed { version: i64, reason: String },

    /// A write collided with a UNIQUE or CHECK constraint.
    #[error("Record rejected: {0}")]
    ConstraintViolation(String),
}

impl DatabaseError {
    /// Reclassify SQLite constraint failures, keeping other errors as-is.
    pub(crate) fn from_write(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(msg.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => Self::Sqlite(err),
        }
    }
}
