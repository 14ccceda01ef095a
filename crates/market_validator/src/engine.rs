//! The rule engine.

use crate::error::{Result, ValidatorError};
use crate::report::{ColumnReport, RuleCoverage, RuleOutcome, TrendPoint, ValidationReport, ValidationSummary};
use crate::rules::ValidationRule;
use crate::table::{CellValue, Column, Table};
use chrono::Utc;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Retention policy for the validation history.
///
/// The history grows with every run; `Unbounded` keeps everything (the
/// default), `LastN` keeps only the most recent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRetention {
    /// Keep every report
    Unbounded,
    /// Keep only the most recent N reports
    LastN(usize),
}

/// Rule-based validator for tabular dataset snapshots.
///
/// Owns a set of per-column rules and an ordered history of validation
/// reports. Rules are applied in registration order; a column's validity is
/// the AND of its rule outcomes, and a run's overall validity is the AND
/// over all configured columns.
pub struct RuleEngine {
    rules: BTreeMap<String, Vec<ValidationRule>>,
    history: Vec<ValidationReport>,
    retention: HistoryRetention,
    regex_cache: HashMap<String, Regex>,
}

impl RuleEngine {
    /// Creates an engine with unbounded history.
    pub fn new() -> Self {
        Self::with_retention(HistoryRetention::Unbounded)
    }

    /// Creates an engine with the given history retention policy.
    pub fn with_retention(retention: HistoryRetention) -> Self {
        Self {
            rules: BTreeMap::new(),
            history: Vec::new(),
            retention,
            regex_cache: HashMap::new(),
        }
    }

    /// Registers a rule for a column. Multiple rules per column are
    /// permitted and independent; parameters are not checked until
    /// evaluation time.
    pub fn add_rule(&mut self, column: impl Into<String>, rule: ValidationRule) {
        self.rules.entry(column.into()).or_default().push(rule);
    }

    /// Returns the registered rule set.
    pub fn rules(&self) -> &BTreeMap<String, Vec<ValidationRule>> {
        &self.rules
    }

    /// Returns the validation history in run order.
    pub fn history(&self) -> &[ValidationReport] {
        &self.history
    }

    /// Validates a table against every registered rule and appends the
    /// report to the history.
    ///
    /// A configured column that is absent from the table records a
    /// column-level error and forces overall invalidity. Rule evaluation
    /// failures (type mismatches, malformed parameters) become failed
    /// outcomes with embedded messages and never abort the run.
    pub fn validate(&mut self, table: &Table) -> &ValidationReport {
        let mut columns = BTreeMap::new();
        let mut overall = true;

        for (name, rules) in &self.rules {
            let column_report = match table.column(name) {
                None => ColumnReport::missing(),
                Some(column) => {
                    let outcomes: Vec<RuleOutcome> = rules
                        .iter()
                        .map(|rule| apply_rule(&mut self.regex_cache, column, rule))
                        .collect();
                    ColumnReport {
                        is_valid: outcomes.iter().all(|o| o.is_valid),
                        error: None,
                        outcomes,
                    }
                }
            };
            if !column_report.is_valid {
                overall = false;
            }
            columns.insert(name.clone(), column_report);
        }

        let report = ValidationReport {
            timestamp: Utc::now(),
            row_count: table.row_count(),
            columns,
            overall_validity: overall,
        };
        debug!(valid = report.overall_validity, rows = report.row_count, "validation run recorded");

        self.history.push(report);
        if let HistoryRetention::LastN(n) = self.retention {
            if self.history.len() > n {
                let excess = self.history.len() - n;
                self.history.drain(..excess);
            }
        }
        self.history.last().expect("history is non-empty after push")
    }

    /// Derives aggregate statistics from the history.
    pub fn summary(&self) -> Result<ValidationSummary> {
        if self.history.is_empty() {
            return Err(ValidatorError::NoHistory);
        }

        let total_runs = self.history.len();
        let successes = self
            .history
            .iter()
            .filter(|r| r.overall_validity)
            .count();
        let last_successful = self
            .history
            .iter()
            .rev()
            .find(|r| r.overall_validity)
            .map(|r| r.timestamp);

        let rules_per_column: BTreeMap<String, usize> = self
            .rules
            .iter()
            .map(|(column, rules)| (column.clone(), rules.len()))
            .collect();
        let coverage = RuleCoverage {
            total_columns: self.rules.len(),
            total_rules: rules_per_column.values().sum(),
            rules_per_column,
        };

        let trend = self
            .history
            .iter()
            .map(|r| TrendPoint {
                timestamp: r.timestamp,
                valid: r.overall_validity,
                error_count: r.error_count(),
            })
            .collect();

        Ok(ValidationSummary {
            total_runs,
            success_rate: successes as f64 / total_runs as f64,
            last_successful,
            coverage,
            trend,
        })
    }

    /// Serializes the rule set to pretty-printed JSON.
    pub fn export_rules(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
    }

    /// Replaces the entire rule set from a JSON document.
    ///
    /// The import is atomic: a parse failure leaves the existing rules
    /// untouched.
    pub fn import_rules(&mut self, json: &str) -> Result<()> {
        let rules: BTreeMap<String, Vec<ValidationRule>> = serde_json::from_str(json)?;
        self.rules = rules;
        Ok(())
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates one rule against one column.
///
/// Evaluation never fails: anything that would be an error (non-numeric
/// data under a range rule, an invalid regex) is returned as an invalid
/// outcome whose details carry the message.
fn apply_rule(
    regex_cache: &mut HashMap<String, Regex>,
    column: &Column,
    rule: &ValidationRule,
) -> RuleOutcome {
    let (is_valid, details) = match rule {
        ValidationRule::Type { expected } => {
            let actual = column.dtype();
            (actual == expected, serde_json::json!({ "actual_type": actual }))
        }

        ValidationRule::Range { min, max } => return range_outcome(column, *min, *max),

        ValidationRule::Uniqueness => {
            let mut seen = HashSet::new();
            let duplicates = column
                .values()
                .iter()
                .filter(|v| !seen.insert(v.as_key()))
                .count();
            (duplicates == 0, serde_json::json!({ "duplicate_count": duplicates }))
        }

        ValidationRule::Pattern { regex } => return pattern_outcome(regex_cache, column, regex),

        ValidationRule::Missingness { threshold } => {
            let missing = column.null_count() as u64;
            (missing <= *threshold, serde_json::json!({ "missing_count": missing }))
        }

        ValidationRule::Categorical { allowed } => {
            let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();
            let mut invalid: Vec<String> = column
                .non_null()
                .map(CellValue::as_key)
                .filter(|key| !allowed.contains(key.as_str()))
                .collect::<HashSet<String>>()
                .into_iter()
                .collect();
            invalid.sort();
            (invalid.is_empty(), serde_json::json!({ "invalid_values": invalid }))
        }
    };

    RuleOutcome {
        kind: rule.kind().to_string(),
        is_valid,
        details,
    }
}

fn range_outcome(column: &Column, min: Option<f64>, max: Option<f64>) -> RuleOutcome {
    let mut observed_min: Option<f64> = None;
    let mut observed_max: Option<f64> = None;

    for value in column.non_null() {
        match value.as_f64() {
            Some(n) => {
                observed_min = Some(observed_min.map_or(n, |m| m.min(n)));
                observed_max = Some(observed_max.map_or(n, |m| m.max(n)));
            }
            None => {
                return failed_outcome(
                    "range",
                    format!("range rule requires numeric values, found {}", value.type_name()),
                );
            }
        }
    }

    let (observed_min, observed_max) = match (observed_min, observed_max) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return failed_outcome("range", "column has no values to bound".to_string()),
    };

    let mut is_valid = true;
    if let Some(min) = min {
        is_valid &= observed_min >= min;
    }
    if let Some(max) = max {
        is_valid &= observed_max <= max;
    }

    RuleOutcome {
        kind: "range".to_string(),
        is_valid,
        details: serde_json::json!({ "min": observed_min, "max": observed_max }),
    }
}

fn pattern_outcome(
    regex_cache: &mut HashMap<String, Regex>,
    column: &Column,
    pattern: &str,
) -> RuleOutcome {
    if !regex_cache.contains_key(pattern) {
        match Regex::new(pattern) {
            Ok(compiled) => {
                regex_cache.insert(pattern.to_string(), compiled);
            }
            Err(e) => return failed_outcome("pattern", format!("invalid regex: {}", e)),
        }
    }
    let regex = &regex_cache[pattern];

    let mut non_matching = 0usize;
    for value in column.non_null() {
        match value.as_str() {
            Some(s) => {
                if !regex.is_match(s) {
                    non_matching += 1;
                }
            }
            None => {
                return failed_outcome(
                    "pattern",
                    format!("pattern rule requires string values, found {}", value.type_name()),
                );
            }
        }
    }

    RuleOutcome {
        kind: "pattern".to_string(),
        is_valid: non_matching == 0,
        details: serde_json::json!({ "non_matching": non_matching }),
    }
}

fn failed_outcome(kind: &str, message: String) -> RuleOutcome {
    RuleOutcome {
        kind: kind.to_string(),
        is_valid: false,
        details: serde_json::json!({ "error": message }),
    }
}
