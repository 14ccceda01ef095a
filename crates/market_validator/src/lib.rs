//! # Market Validator
//!
//! Rule-based validation engine for tabular dataset snapshots. Callers
//! register per-column rules, run whole-table validations, and read
//! aggregate trend statistics from the accumulated history:
//!
//! - Six rule kinds: type, range, uniqueness, pattern, missingness, categorical
//! - Failures are data, not errors: a malformed rule or a type mismatch
//!   becomes a failed rule outcome carrying the message
//! - Ordered, immutable validation history with a configurable retention policy
//! - JSON rule export/import with atomic replacement
//!
//! ## Example
//!
//! ```rust
//! use market_validator::{Column, RuleEngine, Table, ValidationRule};
//!
//! let mut engine = RuleEngine::new();
//! engine.add_rule("reading", ValidationRule::Range { min: Some(0.0), max: Some(100.0) });
//!
//! let table = Table::from_columns(vec![Column::new(
//!     "reading",
//!     vec![12.0.into(), 55.5.into(), 99.9.into()],
//! )]);
//!
//! let report = engine.validate(&table);
//! assert!(report.overall_validity);
//! ```

pub mod engine;
pub mod error;
pub mod report;
pub mod rules;
pub mod table;

pub use engine::*;
pub use error::*;
pub use report::*;
pub use rules::*;
pub use table::*;
