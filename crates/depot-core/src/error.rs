//! # Error Types
//!
//! Domain-specific error types for depot-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  depot-core errors (this file)                                         │
//! │  └── CoreError        - Values that cannot become entities             │
//! │                                                                         │
//! │  depot-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: CoreError → DbError::Decode → caller                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored measurement is not a valid decimal.
    ///
    /// ## When This Occurs
    /// - A row was written by something other than this crate
    /// - The column was edited by hand
    #[error("Invalid {field} measurement '{value}': {reason}")]
    InvalidMeasurement {
        field: String,
        value: String,
        reason: String,
    },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidMeasurement {
            field: "Weight".to_string(),
            value: "heavy".to_string(),
            reason: "Invalid decimal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid Weight measurement 'heavy': Invalid decimal"
        );
    }
}
