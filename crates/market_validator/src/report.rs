//! Validation reports and aggregate statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome of evaluating one rule against one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Rule kind name
    pub kind: String,

    /// Whether the rule held
    pub is_valid: bool,

    /// Kind-specific diagnostic details; evaluation errors appear here
    /// under an `error` key instead of propagating
    pub details: Value,
}

/// Aggregated outcome for one configured column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// AND over all rule outcomes; false when the column is absent
    pub is_valid: bool,

    /// Column-level error, set when the column is absent from the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Per-rule outcomes in registration order
    pub outcomes: Vec<RuleOutcome>,
}

impl ColumnReport {
    /// Report for a configured column that the data does not contain.
    pub fn missing() -> Self {
        Self {
            is_valid: false,
            error: Some("column not found in dataset".to_string()),
            outcomes: Vec::new(),
        }
    }
}

/// Outcome of one validation run over one dataset snapshot.
///
/// Reports are immutable once appended to the engine's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// When the run happened
    pub timestamp: DateTime<Utc>,

    /// Rows in the validated snapshot
    pub row_count: usize,

    /// Per-column results, keyed by column name
    pub columns: BTreeMap<String, ColumnReport>,

    /// AND over all column results
    pub overall_validity: bool,
}

impl ValidationReport {
    /// Number of columns that failed in this run.
    pub fn error_count(&self) -> usize {
        self.columns.values().filter(|c| !c.is_valid).count()
    }
}

/// Rule coverage statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCoverage {
    /// Number of columns with at least one rule
    pub total_columns: usize,

    /// Total registered rules
    pub total_rules: usize,

    /// Rules per column
    pub rules_per_column: BTreeMap<String, usize>,
}

/// One point of the per-run validity trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Run timestamp
    pub timestamp: DateTime<Utc>,

    /// Whether the run was fully valid
    pub valid: bool,

    /// Failed-column count of the run
    pub error_count: usize,
}

/// Aggregate statistics over the validation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of recorded runs
    pub total_runs: usize,

    /// Fraction of fully-valid runs
    pub success_rate: f64,

    /// Timestamp of the most recent fully-valid run, if any
    pub last_successful: Option<DateTime<Utc>>,

    /// Rule coverage at summary time
    pub coverage: RuleCoverage,

    /// Per-run trend in history order
    pub trend: Vec<TrendPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_count_includes_missing_columns() {
        let mut columns = BTreeMap::new();
        columns.insert("present".to_string(), ColumnReport {
            is_valid: true,
            error: None,
            outcomes: Vec::new(),
        });
        columns.insert("absent".to_string(), ColumnReport::missing());

        let report = ValidationReport {
            timestamp: Utc::now(),
            row_count: 10,
            columns,
            overall_validity: false,
        };
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_missing_column_report_shape() {
        let report = ColumnReport::missing();
        assert!(!report.is_valid);
        assert_eq!(report.error.as_deref(), Some("column not found in dataset"));
        assert!(report.outcomes.is_empty());
    }
}
