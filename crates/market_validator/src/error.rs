//! Error types for validation operations.
//!
//! Rule evaluation failures never appear here: they are captured inside
//! [`crate::RuleOutcome`] so one bad rule cannot abort validation of the
//! remaining columns.

use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Errors raised by the rule engine outside of rule evaluation.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// A summary was requested before any validation ran
    #[error("no validation history available")]
    NoHistory,

    /// Rule set serialization or deserialization failed
    #[error("rule serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tabular input could not be interpreted
    #[error("invalid table: {0}")]
    InvalidTable(String),
}
