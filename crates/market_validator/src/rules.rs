//! Validation rule definitions.

use serde::{Deserialize, Serialize};

/// One constraint bound to a column.
///
/// Rules are declarative: parameters are not checked at registration time.
/// A malformed rule (for instance an invalid regex) surfaces as a failed
/// [`crate::RuleOutcome`] when it is evaluated, never as a registration
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValidationRule {
    /// Column's declared type must equal the expected type name
    Type {
        /// Expected type name (e.g. "int64", "float64", "string")
        expected: String,
    },

    /// Numeric column must lie within optional, independently-checked bounds
    Range {
        /// Minimum value (inclusive), unchecked when absent
        #[serde(default)]
        min: Option<f64>,
        /// Maximum value (inclusive), unchecked when absent
        #[serde(default)]
        max: Option<f64>,
    },

    /// Column must contain no duplicate values
    Uniqueness,

    /// Every value must match the regular expression
    Pattern {
        /// Regular expression pattern
        regex: String,
    },

    /// Count of null values must not exceed the threshold
    Missingness {
        /// Maximum allowed nulls, defaults to zero
        #[serde(default)]
        threshold: u64,
    },

    /// Every value must be a member of the allowed set
    Categorical {
        /// Allowed values
        allowed: Vec<String>,
    },
}

impl ValidationRule {
    /// Returns the lowercase kind name of this rule.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationRule::Type { .. } => "type",
            ValidationRule::Range { .. } => "range",
            ValidationRule::Uniqueness => "uniqueness",
            ValidationRule::Pattern { .. } => "pattern",
            ValidationRule::Missingness { .. } => "missingness",
            ValidationRule::Categorical { .. } => "categorical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tagged_serialization() {
        let rule = ValidationRule::Range {
            min: Some(0.0),
            max: None,
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"kind":"range","min":0.0,"max":null}"#);

        let back: ValidationRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn test_defaults_on_deserialization() {
        let rule: ValidationRule = serde_json::from_str(r#"{"kind":"missingness"}"#).unwrap();
        assert_eq!(rule, ValidationRule::Missingness { threshold: 0 });

        let rule: ValidationRule = serde_json::from_str(r#"{"kind":"range","min":1.0}"#).unwrap();
        assert_eq!(
            rule,
            ValidationRule::Range {
                min: Some(1.0),
                max: None
            }
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ValidationRule::Uniqueness.kind(), "uniqueness");
        assert_eq!(
            ValidationRule::Pattern {
                regex: ".*".to_string()
            }
            .kind(),
            "pattern"
        );
    }
}
