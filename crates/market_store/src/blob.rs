//! Raw-byte persistence boundary.
//!
//! The content store delegates raw-byte persistence to a [`BlobStore`], so
//! the same hash-integrity contract holds whether bytes live on the local
//! filesystem or in an external content-addressed network. [`FsBlobStore`]
//! is the bundled filesystem-backed implementation.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A pinned blob entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PinRecord {
    /// Key of the pinned blob
    pub key: String,
    /// When the pin was taken
    pub pinned_at: DateTime<Utc>,
}

/// Persistence boundary for raw dataset bytes.
///
/// Mirrors the capability set of an IPFS-like collaborator: add bytes under
/// a key, read them back, and pin/unpin entries that must persist.
pub trait BlobStore {
    /// Writes all bytes from `reader` under `key`, returning the byte count.
    fn put(&self, key: &str, reader: &mut dyn Read) -> Result<u64>;

    /// Reads the blob stored under `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Returns true if a blob exists under `key`.
    fn contains(&self, key: &str) -> bool;

    /// Pins a blob so it persists.
    fn pin(&self, key: &str) -> Result<()>;

    /// Removes a pin.
    fn unpin(&self, key: &str) -> Result<()>;

    /// Lists current pins.
    fn pins(&self) -> Vec<PinRecord>;
}

/// Filesystem-backed [`BlobStore`].
///
/// Blobs are stored as `<root>/<key>.data`, written to a temporary sibling
/// and atomically renamed so a failed write never leaves a partial blob
/// behind. Pins are tracked in memory.
pub struct FsBlobStore {
    root: PathBuf,
    pins: Mutex<HashMap<String, PinRecord>>,
}

impl FsBlobStore {
    /// Opens a blob store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            pins: Mutex::new(HashMap::new()),
        })
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.data", key))
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &str, reader: &mut dyn Read) -> Result<u64> {
        let path = self.blob_path(key);
        let tmp = path.with_extension("data.tmp");

        let mut file = fs::File::create(&tmp)?;
        let written = io::copy(reader, &mut file)?;
        file.flush()?;
        fs::rename(&tmp, &path)?;

        debug!(key, written, "blob written");
        Ok(written)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        match fs::read(self.blob_path(key)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.blob_path(key).is_file()
    }

    fn pin(&self, key: &str) -> Result<()> {
        if !self.contains(key) {
            return Err(StoreError::not_found(key));
        }
        let record = PinRecord {
            key: key.to_string(),
            pinned_at: Utc::now(),
        };
        self.pins.lock().expect("pin registry poisoned").insert(key.to_string(), record);
        Ok(())
    }

    fn unpin(&self, key: &str) -> Result<()> {
        self.pins.lock().expect("pin registry poisoned").remove(key);
        Ok(())
    }

    fn pins(&self) -> Vec<PinRecord> {
        self.pins
            .lock()
            .expect("pin registry poisoned")
            .values()
            .cloned()
            .collect()
    }
}

/// Returns the path of the blob file for a key under a root directory.
///
/// Exposed for tests that corrupt blobs out-of-band.
pub fn blob_file_path(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{}.data", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_put_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let blobs = FsBlobStore::open(dir.path()).unwrap();

        let written = blobs.put("k1", &mut &b"payload"[..]).unwrap();
        assert_eq!(written, 7);
        assert!(blobs.contains("k1"));
        assert_eq!(blobs.get("k1").unwrap(), b"payload");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let blobs = FsBlobStore::open(dir.path()).unwrap();
        assert!(matches!(blobs.get("absent"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_pin_lifecycle() {
        let dir = TempDir::new().unwrap();
        let blobs = FsBlobStore::open(dir.path()).unwrap();
        blobs.put("k1", &mut &b"x"[..]).unwrap();

        assert!(matches!(blobs.pin("absent"), Err(StoreError::NotFound(_))));
        blobs.pin("k1").unwrap();
        assert_eq!(blobs.pins().len(), 1);
        assert_eq!(blobs.pins()[0].key, "k1");

        blobs.unpin("k1").unwrap();
        assert!(blobs.pins().is_empty());
    }
}
