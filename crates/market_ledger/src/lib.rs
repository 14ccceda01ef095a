//! # Market Ledger
//!
//! Agreement lifecycle client for the Dataset Marketplace Engine. A
//! data-access agreement between a dataset owner and a counterparty is an
//! on-chain record progressing through an explicit state machine
//! (`pending -> executed | revoked`); this crate builds, submits, and
//! interprets the instructions that drive it:
//!
//! - [`LedgerClient`]: the abstract external-ledger boundary
//! - [`AgreementClient`]: create / execute / verify / revoke, with every
//!   ledger call bounded by a timeout
//! - [`process_purchase`]: balance-checked dataset payment producing a
//!   journal-ready transaction record
//! - [`MemoryLedger`]: in-memory ledger with full state-machine and signer
//!   enforcement, for tests and node-free development
//!
//! The ledger, not this client, authorizes state transitions: a revoked or
//! executed agreement rejects further transitions regardless of what the
//! client submits.

pub mod agreement;
pub mod client;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod payment;
pub mod state;

pub use agreement::*;
pub use client::*;
pub use error::*;
pub use instruction::*;
pub use memory::*;
pub use payment::*;
pub use state::*;
