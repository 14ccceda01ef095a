//! Error types for storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the content store and transaction journal.
///
/// Integrity mismatches are deliberately absent: integrity checking is
/// side-effect-free and reports through a boolean, never an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure while persisting or reading records
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    /// Dataset data or metadata record is absent
    #[error("dataset '{0}' not found")]
    NotFound(String),

    /// A persisted record could not be parsed
    #[error("malformed record for '{id}': {source}")]
    Malformed {
        /// Identifier of the offending record
        id: String,
        /// Underlying parse failure
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Creates a not-found error for a dataset identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Creates a malformed-record error.
    pub fn malformed(id: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            id: id.into(),
            source,
        }
    }
}
