//! Append-only transaction journal.

use crate::error::{Result, StoreError};
use market_core::Transaction;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Journal of completed marketplace transactions.
///
/// Entries are kept as a JSON array in a single file. Each append
/// re-reads the current entries, adds the new one, writes the result to a
/// temporary sibling, and atomically renames it into place. The
/// read-modify-write sequence is serialized by an internal mutex, so
/// concurrent appenders never lose entries; a crash mid-write leaves the
/// previous journal intact.
pub struct TransactionJournal {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TransactionJournal {
    /// Opens a journal backed by the given file. The file is created lazily
    /// on first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Appends a transaction record.
    pub fn append(&self, transaction: Transaction) -> Result<()> {
        let _guard = self.write_lock.lock().expect("journal lock poisoned");

        let mut entries = self.read_entries()?;
        entries.push(transaction);

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        serde_json::to_writer(&mut file, &entries)
            .map_err(|e| StoreError::malformed(self.path.display().to_string(), e))?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;

        debug!(entries = entries.len(), "journal updated");
        Ok(())
    }

    /// Reads all recorded transactions in append order.
    pub fn read(&self) -> Result<Vec<Transaction>> {
        self.read_entries()
    }

    fn read_entries(&self) -> Result<Vec<Transaction>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::malformed(self.path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use market_core::{DatasetId, TransactionStatus};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn tx(n: usize) -> Transaction {
        Transaction {
            transaction_id: format!("sig_{}", n),
            seller_address: "seller".to_string(),
            buyer_address: "buyer".to_string(),
            dataset_id: DatasetId::from("dataset_20240101000000_abcdef012345"),
            amount: 1.0,
            timestamp: Utc::now(),
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_read_missing_journal_is_empty() {
        let dir = TempDir::new().unwrap();
        let journal = TransactionJournal::open(dir.path().join("transactions.json"));
        assert_eq!(journal.read().unwrap(), Vec::new());
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = TempDir::new().unwrap();
        let journal = TransactionJournal::open(dir.path().join("transactions.json"));

        for n in 0..5 {
            journal.append(tx(n)).unwrap();
        }

        let entries = journal.read().unwrap();
        assert_eq!(entries.len(), 5);
        let ids: Vec<&str> = entries.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["sig_0", "sig_1", "sig_2", "sig_3", "sig_4"]);
    }
}
