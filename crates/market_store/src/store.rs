//! The content-addressed dataset store.

use crate::blob::{BlobStore, FsBlobStore};
use crate::error::{Result, StoreError};
use crate::hash::{sha256_hex, HashingReader};
use crate::journal::TransactionJournal;
use market_core::{DatasetId, DatasetMetadata, Transaction};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Content-addressed store for dataset bytes and metadata.
///
/// Each stored dataset produces two related records under one generated
/// identifier: the raw bytes (delegated to the [`BlobStore`]) and a JSON
/// metadata record whose `file_hash` field carries the SHA-256 digest
/// computed at store time. Mutating operations are serialized by an
/// internal mutex; reads may proceed concurrently.
pub struct DatasetStore<B: BlobStore = FsBlobStore> {
    root: PathBuf,
    blobs: B,
    journal: TransactionJournal,
    write_lock: Mutex<()>,
}

impl DatasetStore<FsBlobStore> {
    /// Opens a store rooted at `root` with the filesystem blob backend,
    /// creating the directory if needed. The transaction journal lives at
    /// `<root>/transactions.json`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let blobs = FsBlobStore::open(&root)?;
        Self::with_blob_store(root, blobs)
    }
}

impl<B: BlobStore> DatasetStore<B> {
    /// Opens a store with a caller-provided blob backend.
    pub fn with_blob_store(root: impl Into<PathBuf>, blobs: B) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let journal = TransactionJournal::open(root.join("transactions.json"));
        Ok(Self {
            root,
            blobs,
            journal,
            write_lock: Mutex::new(()),
        })
    }

    /// Stores a dataset: streams the bytes into the blob store while
    /// computing the SHA-256 digest, then persists the completed metadata
    /// record. Returns the generated identifier.
    ///
    /// The digest and byte count are filled into the metadata's `file_hash`
    /// and `size_bytes` fields; the caller-provided values are overwritten.
    pub fn store(&self, reader: &mut dyn Read, mut metadata: DatasetMetadata) -> Result<DatasetId> {
        let id = DatasetId::generate();

        let _guard = self.write_lock.lock().expect("store lock poisoned");

        let mut hashing = HashingReader::new(reader);
        self.blobs.put(id.as_str(), &mut hashing)?;
        let (digest, written) = hashing.finalize();

        metadata.file_hash = digest;
        metadata.size_bytes = written;
        self.write_metadata(&id, &metadata)?;

        info!(id = %id, size = written, "dataset stored");
        Ok(id)
    }

    /// Retrieves a dataset's raw bytes and metadata record.
    pub fn retrieve(&self, id: &DatasetId) -> Result<(Vec<u8>, DatasetMetadata)> {
        let data = self.blobs.get(id.as_str())?;
        let metadata = self.read_metadata(id)?;
        Ok((data, metadata))
    }

    /// Verifies that the stored bytes still match the recorded digest.
    ///
    /// Side-effect-free and infallible by contract: any retrieval failure
    /// (missing records, unreadable files, malformed metadata) reports as
    /// `false`, never as an error.
    pub fn verify_integrity(&self, id: &DatasetId) -> bool {
        match self.retrieve(id) {
            Ok((data, metadata)) => {
                let matches = sha256_hex(&data) == metadata.file_hash;
                if !matches {
                    warn!(id = %id, "content hash mismatch");
                }
                matches
            }
            Err(e) => {
                debug!(id = %id, error = %e, "integrity check could not retrieve dataset");
                false
            }
        }
    }

    /// Lists metadata records matching the given filters.
    ///
    /// A record matches when every filter key names a metadata field with an
    /// equal JSON value (see [`DatasetMetadata::matches_filters`]). The
    /// returned order is arbitrary.
    pub fn list(&self, filters: &HashMap<String, Value>) -> Result<Vec<DatasetMetadata>> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("meta") {
                continue;
            }
            let bytes = fs::read(&path)?;
            let metadata: DatasetMetadata = serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::malformed(path.display().to_string(), e))?;
            if metadata.matches_filters(filters) {
                records.push(metadata);
            }
        }
        Ok(records)
    }

    /// Records a completed transaction in the journal.
    pub fn record_transaction(&self, transaction: Transaction) -> Result<()> {
        self.journal.append(transaction)
    }

    /// Reads all recorded transactions in append order.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.journal.read()
    }

    /// Returns the blob backend.
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    fn metadata_path(&self, id: &DatasetId) -> PathBuf {
        self.root.join(format!("{}.meta", id))
    }

    fn write_metadata(&self, id: &DatasetId, metadata: &DatasetMetadata) -> Result<()> {
        let path = self.metadata_path(id);
        let tmp = path.with_extension("meta.tmp");

        let mut file = fs::File::create(&tmp)?;
        serde_json::to_writer(&mut file, metadata)
            .map_err(|e| StoreError::malformed(id.as_str(), e))?;
        file.flush()?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn read_metadata(&self, id: &DatasetId) -> Result<DatasetMetadata> {
        let bytes = match fs::read(self.metadata_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(id.as_str()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::malformed(id.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::{DataCategory, MetadataBuilder};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_metadata() -> DatasetMetadata {
        MetadataBuilder::new("Sample", DataCategory::Experimental)
            .license("MIT")
            .build()
    }

    #[test]
    fn test_store_fills_hash_and_size() {
        let dir = TempDir::new().unwrap();
        let store = DatasetStore::open(dir.path()).unwrap();

        let id = store.store(&mut &b"hello world"[..], sample_metadata()).unwrap();
        let (data, metadata) = store.retrieve(&id).unwrap();

        assert_eq!(data, b"hello world");
        assert_eq!(metadata.size_bytes, 11);
        assert_eq!(metadata.file_hash, sha256_hex(b"hello world"));
    }

    #[test]
    fn test_retrieve_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = DatasetStore::open(dir.path()).unwrap();
        let absent = DatasetId::from("dataset_20240101000000_000000000000");
        assert!(matches!(
            store.retrieve(&absent),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_verify_integrity_of_missing_dataset_is_false() {
        let dir = TempDir::new().unwrap();
        let store = DatasetStore::open(dir.path()).unwrap();
        let absent = DatasetId::from("dataset_20240101000000_000000000000");
        assert!(!store.verify_integrity(&absent));
    }
}
