//! Error types for ledger operations.

use std::time::Duration;
use thiserror::Error;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised by ledger submission, confirmation, and decoding.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Submission reached the ledger and was not accepted
    #[error("ledger submission failed: {0}")]
    Submission(String),

    /// A ledger call exceeded its caller-supplied bound.
    ///
    /// A timed-out submission is neither committed nor rolled back; callers
    /// resolve the ambiguity by re-querying the agreement, not by retrying.
    #[error("ledger call '{operation}' timed out after {after:?}")]
    Timeout {
        /// Name of the timed-out call
        operation: String,
        /// The bound that was exceeded
        after: Duration,
    },

    /// The referenced account does not exist on the ledger
    #[error("account '{0}' not found")]
    NotFound(String),

    /// An on-chain payload could not be parsed
    #[error("malformed ledger payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The ledger rejected an instruction (bad state transition or signer)
    #[error("instruction rejected: {0}")]
    Rejected(String),

    /// A transfer or rent reservation exceeds the payer's balance
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the operation needed, in base units
        required: u64,
        /// Amount actually available, in base units
        available: u64,
    },
}

impl LedgerError {
    /// Creates a not-found error for an account address.
    pub fn not_found(address: impl Into<String>) -> Self {
        Self::NotFound(address.into())
    }

    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}
