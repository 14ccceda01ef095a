//! Dataset metadata records and filter matching.
//!
//! The field names of [`DatasetMetadata`] are the wire format of the
//! persisted metadata record and the namespace for listing filters, so they
//! follow the stored JSON layout rather than Rust naming conventions where
//! the two diverge (`data_type`, `creation_date`, `price_tokens`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Category of a scientific dataset.
///
/// Closed set; unknown categories are rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataCategory {
    /// Data produced by controlled experiments
    Experimental,
    /// Data gathered by observation of uncontrolled systems
    Observational,
    /// Data produced by simulation or computation
    Computational,
    /// Data collected through surveys or questionnaires
    Survey,
}

impl DataCategory {
    /// Returns the lowercase wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Experimental => "experimental",
            DataCategory::Observational => "observational",
            DataCategory::Computational => "computational",
            DataCategory::Survey => "survey",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experimental" => Ok(DataCategory::Experimental),
            "observational" => Ok(DataCategory::Observational),
            "computational" => Ok(DataCategory::Computational),
            "survey" => Ok(DataCategory::Survey),
            other => Err(format!(
                "unknown data category '{}': expected one of experimental, observational, computational, survey",
                other
            )),
        }
    }
}

/// Structured metadata describing one stored dataset.
///
/// Created by callers (typically through [`crate::MetadataBuilder`]) and
/// completed by the content store, which fills in `file_hash` and
/// `size_bytes` at store time. Records are never mutated in place once
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Human-readable dataset title
    pub title: String,

    /// Longer description of contents and provenance
    pub description: String,

    /// Dataset category
    pub data_type: DataCategory,

    /// Free-form keywords for discovery
    pub keywords: Vec<String>,

    /// Authors in citation order
    pub authors: Vec<String>,

    /// When the dataset was created
    pub creation_date: DateTime<Utc>,

    /// License string (e.g. "CC-BY-4.0")
    pub license: String,

    /// Hex-encoded SHA-256 digest of the raw bytes, set at store time
    pub file_hash: String,

    /// Size of the raw bytes, set at store time
    pub size_bytes: u64,

    /// Asking price in marketplace tokens; non-negative
    pub price_tokens: f64,
}

impl DatasetMetadata {
    /// Checks this record against a set of listing filters.
    ///
    /// A record matches when every filter key names a metadata field whose
    /// JSON value equals the filter value. A missing key is a non-match,
    /// never an error. As a convenience, a scalar filter value matches a
    /// list-valued field (`keywords`, `authors`) when the list contains it.
    pub fn matches_filters(&self, filters: &HashMap<String, Value>) -> bool {
        if filters.is_empty() {
            return true;
        }
        // Serialization of a plain struct cannot fail
        let record = serde_json::to_value(self).expect("metadata serializes to JSON");
        let fields = record.as_object().expect("metadata serializes to an object");

        filters.iter().all(|(key, expected)| {
            match fields.get(key) {
                Some(actual) if actual == expected => true,
                Some(Value::Array(items)) => items.contains(expected),
                _ => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataBuilder;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> DatasetMetadata {
        MetadataBuilder::new("Coastal salinity 2023", DataCategory::Observational)
            .description("Hourly salinity readings from buoy network")
            .author("M. Okafor")
            .author("L. Tran")
            .keyword("ocean")
            .license("CC0-1.0")
            .price_tokens(3.0)
            .build()
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&DataCategory::Experimental).unwrap(),
            "\"experimental\""
        );
        let parsed: DataCategory = serde_json::from_str("\"survey\"").unwrap();
        assert_eq!(parsed, DataCategory::Survey);
        assert!("genomic".parse::<DataCategory>().is_err());
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(sample().matches_filters(&HashMap::new()));
    }

    #[test]
    fn test_filter_on_equal_value() {
        let mut filters = HashMap::new();
        filters.insert("data_type".to_string(), json!("observational"));
        assert!(sample().matches_filters(&filters));

        filters.insert("data_type".to_string(), json!("survey"));
        assert!(!sample().matches_filters(&filters));
    }

    #[test]
    fn test_filter_on_missing_key_is_non_match() {
        let mut filters = HashMap::new();
        filters.insert("no_such_field".to_string(), json!("anything"));
        assert!(!sample().matches_filters(&filters));
    }

    #[test]
    fn test_scalar_filter_matches_list_membership() {
        let mut filters = HashMap::new();
        filters.insert("authors".to_string(), json!("L. Tran"));
        assert!(sample().matches_filters(&filters));

        filters.insert("authors".to_string(), json!("Nobody"));
        assert!(!sample().matches_filters(&filters));
    }

    #[test]
    fn test_metadata_round_trip() {
        let metadata = sample();
        let json = serde_json::to_string(&metadata).unwrap();
        let back: DatasetMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
