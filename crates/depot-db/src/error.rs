//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  mapped strategy               tracked strategy                        │
//! │  sqlx::Error                   sea_orm::DbErr                          │
//! │       │                             │                                   │
//! │       │                             │ unwraps the sqlx error it carries │
//! │       ▼                             ▼                                   │
//! │  DbError (this module) ← same classification for both strategies       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (store message kept verbatim inside the variant)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absence is not an error here: lookups return `Ok(None)` and updates or
//! deletes that match nothing return `Ok(())`.

use depot_core::CoreError;
use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Writing an order whose product_id has no product row
    /// - Deleting a product that orders still reference
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Unique or primary key constraint violation.
    #[error("Unique violation: {message}")]
    UniqueViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be opened or created
    /// - Pool was closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Pool exhausted (all connections in use until the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Any other statement failure reported by the store.
    ///
    /// ## When This Occurs
    /// - A trigger raised an error
    /// - Runtime SQL error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value could not be turned into an entity.
    #[error("Decode failed: {0}")]
    Decode(#[from] CoreError),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Returns true for foreign key violations.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, DbError::ForeignKeyViolation { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → by error kind (FK / unique / other)
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// sqlx::Error::Io / Tls       → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                // SQLite reports FK failures as "FOREIGN KEY constraint failed"
                if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation)
                    || message.contains("FOREIGN KEY constraint failed")
                {
                    DbError::ForeignKeyViolation { message }
                } else if matches!(db_err.kind(), ErrorKind::UniqueViolation)
                    || message.contains("UNIQUE constraint failed")
                {
                    DbError::UniqueViolation { message }
                } else {
                    DbError::QueryFailed(message)
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            sqlx::Error::Configuration(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Convert sea-orm errors to DbError.
///
/// sea-orm runs on sqlx, so statement and connection failures carry the
/// underlying `sqlx::Error`; those go through the same mapping as above.
impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Exec(RuntimeErr::SqlxError(e))
            | DbErr::Query(RuntimeErr::SqlxError(e))
            | DbErr::Conn(RuntimeErr::SqlxError(e)) => DbError::from(e),

            DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => DbError::PoolExhausted,

            DbErr::ConnectionAcquire(e) => DbError::ConnectionFailed(e.to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_orm_errors_share_classification() {
        let err = DbError::from(DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::PoolTimedOut)));
        assert!(matches!(err, DbError::PoolExhausted));

        let err = DbError::from(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(err, DbError::PoolExhausted));

        let err = DbError::from(DbErr::RecordNotFound("Order".to_string()));
        assert!(matches!(err, DbError::Internal(_)));
    }

    #[test]
    fn test_decode_wraps_core_error() {
        let err: DbError = CoreError::InvalidMeasurement {
            field: "Weight".to_string(),
            value: "x".to_string(),
            reason: "Invalid decimal".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Decode failed"));
        assert!(!err.is_foreign_key_violation());
    }
}
