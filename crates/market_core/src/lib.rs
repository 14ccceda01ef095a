//! # Market Core
//!
//! Core domain types for the Dataset Marketplace Engine.
//!
//! This crate provides the shared building blocks used by the store, validator,
//! and ledger crates:
//!
//! - **DatasetMetadata**: the structured record describing a stored dataset
//! - **DatasetId**: collision-resistant dataset identifiers
//! - **Transaction**: append-only marketplace transfer records
//! - **MetadataBuilder**: fluent construction of metadata records
//!
//! ## Example
//!
//! ```rust
//! use market_core::{DataCategory, MetadataBuilder};
//!
//! let metadata = MetadataBuilder::new("Protein folding runs", DataCategory::Computational)
//!     .description("Trajectories from 2024 folding simulations")
//!     .author("J. Mendez")
//!     .keyword("proteins")
//!     .license("CC-BY-4.0")
//!     .price_tokens(12.5)
//!     .build();
//!
//! assert_eq!(metadata.data_type, DataCategory::Computational);
//! ```

pub mod builder;
pub mod id;
pub mod metadata;
pub mod transaction;

pub use builder::*;
pub use id::*;
pub use metadata::*;
pub use transaction::*;
