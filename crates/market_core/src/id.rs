//! Dataset identifier generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of hex characters taken from the random suffix.
///
/// 12 characters carry 48 random bits, which keeps the collision probability
/// negligible at practical dataset counts even for identifiers generated
/// within the same second.
const SUFFIX_LEN: usize = 12;

/// Opaque identifier for a stored dataset.
///
/// Identifiers have the shape `dataset_<UTC timestamp>_<12 hex chars>`. The
/// timestamp prefix exists for operator legibility only; uniqueness comes
/// from the cryptographically random suffix, so identifiers stay distinct
/// under concurrent generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        DatasetId(format!("dataset_{}_{}", timestamp, &suffix[..SUFFIX_LEN]))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DatasetId {
    fn from(s: String) -> Self {
        DatasetId(s)
    }
}

impl From<&str> for DatasetId {
    fn from(s: &str) -> Self {
        DatasetId(s.to_string())
    }
}
