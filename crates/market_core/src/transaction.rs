//! Marketplace transaction records.

use crate::DatasetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome state of a marketplace transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Submitted but not yet settled
    Pending,
    /// Settled on the ledger
    Completed,
    /// Rejected or failed to settle
    Failed,
}

impl TransactionStatus {
    /// Returns the lowercase wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed marketplace transfer.
///
/// Transactions are append-only: once written to the journal they are read
/// for listing and auditing, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transfer identifier (the ledger signature for settled transfers)
    pub transaction_id: String,

    /// Seller's ledger address
    pub seller_address: String,

    /// Buyer's ledger address
    pub buyer_address: String,

    /// Dataset the transfer paid for
    pub dataset_id: DatasetId,

    /// Transfer amount in marketplace tokens
    pub amount: f64,

    /// When the transfer settled
    pub timestamp: DateTime<Utc>,

    /// Settlement state
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Completed).unwrap(),
            "\"completed\""
        );
        let parsed: TransactionStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, TransactionStatus::Failed);
    }

    #[test]
    fn test_transaction_round_trip() {
        let tx = Transaction {
            transaction_id: "sig_1".to_string(),
            seller_address: "seller".to_string(),
            buyer_address: "buyer".to_string(),
            dataset_id: DatasetId::from("dataset_20240101000000_abcdef012345"),
            amount: 4.25,
            timestamp: Utc::now(),
            status: TransactionStatus::Completed,
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
