//! Storage error type
//!
//! Every failure of the persistence layer surfaces as a [`StorageError`].
//! "Not found" is never an error at this level: row operations return
//! `Option`/`bool` for that.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors raised by the persistence layer
///
/// When one of these is returned from a write, the write's transaction has
/// already been rolled back.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query, I/O or commit failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The database rejected the write (NOT NULL, CHECK, UNIQUE, FOREIGN KEY)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Schema initialization failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return StorageError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }

        StorageError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_database_errors() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Database(_)));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Constraint("CHECK constraint failed: length(title) > 0".to_string());
        assert_eq!(
            err.to_string(),
            "Constraint violation: CHECK constraint failed: length(title) > 0"
        );
    }
}
