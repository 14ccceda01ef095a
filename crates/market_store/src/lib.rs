//! # Market Store
//!
//! Content-addressed dataset storage for the Dataset Marketplace Engine.
//! This crate persists raw dataset bytes next to structured metadata
//! records, keyed by generated dataset identifiers, and detects tampering
//! by recomputing content hashes:
//!
//! - Streaming SHA-256 hashing with bounded memory
//! - Two related records per dataset: raw bytes and JSON metadata
//! - Side-effect-free integrity verification that never errors
//! - Filterable metadata listing
//! - A mutex-serialized, atomically-replaced transaction journal
//!
//! ## Example
//!
//! ```no_run
//! use market_core::{DataCategory, MetadataBuilder};
//! use market_store::DatasetStore;
//!
//! let store = DatasetStore::open("data/")?;
//! let metadata = MetadataBuilder::new("Buoy readings", DataCategory::Observational)
//!     .license("CC0-1.0")
//!     .build();
//!
//! let id = store.store(&mut &b"raw,bytes\n1,2\n"[..], metadata)?;
//! assert!(store.verify_integrity(&id));
//! # Ok::<(), market_store::StoreError>(())
//! ```

pub mod blob;
pub mod error;
pub mod hash;
pub mod journal;
pub mod store;

pub use blob::*;
pub use error::*;
pub use hash::*;
pub use journal::*;
pub use store::*;
