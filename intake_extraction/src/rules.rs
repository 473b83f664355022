//! Configurable recognition rules for field extraction.
//!
//! Rules are plain data that can be loaded from configuration rather than
//! hardcoded; the defaults below reproduce the shipped recognition table.
//! Order matters: within one field the first matching rule wins.

use regex::Regex;
use serde::{Deserialize, Serialize};

use intake_core::FieldName;

/// Error type for rule building.
#[derive(Debug)]
pub enum BuildError {
    /// The regex pattern is invalid.
    Regex(String),

    /// The pattern has no capture group to take the value from.
    Capture(String),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regex(e) => write!(f, "invalid regex: {e}"),
            Self::Capture(id) => write!(f, "rule {id} has no capture group"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<regex::Error> for BuildError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

/// Definition of a single recognition rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    /// Unique identifier for this rule.
    pub id: String,

    /// The field this rule recognizes.
    pub field: FieldName,

    /// Regex applied to the lowercased document; capture group 1 is the
    /// field value.
    pub pattern: String,
}

impl RuleDef {
    /// Compile into a [`FieldRule`].
    ///
    /// # Errors
    /// Returns an error if the regex is invalid or lacks a capture group.
    pub fn build(&self) -> Result<FieldRule, BuildError> {
        let regex = Regex::new(&self.pattern)?;
        if regex.captures_len() < 2 {
            return Err(BuildError::Capture(self.id.clone()));
        }
        Ok(FieldRule {
            field: self.field,
            regex,
        })
    }
}

/// A compiled recognition rule.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FieldName,
    regex: Regex,
}

impl FieldRule {
    /// Try this rule against a (lowercased) document, returning the raw
    /// captured value on a hit.
    #[must_use]
    pub fn attempt_match(&self, document: &str) -> Option<String> {
        self.regex
            .captures(document)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// The default recognition table, in priority order per field.
#[must_use]
pub fn default_rules() -> Vec<RuleDef> {
    let mut rules = Vec::new();
    rules.extend(company_rules());
    rules.extend(budget_rules());
    rules.extend(deadline_rules());
    rules
}

/// Company recognition: request verbs first, then explicit labels.
fn company_rules() -> Vec<RuleDef> {
    vec![
        RuleDef {
            id: "company_request_verb".to_string(),
            field: FieldName::Company,
            pattern: r"(\w+)\s+(?:needs|wants|requires|is requesting)".to_string(),
        },
        RuleDef {
            id: "company_label".to_string(),
            field: FieldName::Company,
            pattern: r"company[:\s]+(\w+)".to_string(),
        },
        RuleDef {
            id: "client_label".to_string(),
            field: FieldName::Company,
            pattern: r"client[:\s]+(\w+)".to_string(),
        },
    ]
}

/// Budget recognition: labeled amount, then currency marker, then the
/// "budget of" phrasing.
fn budget_rules() -> Vec<RuleDef> {
    vec![
        RuleDef {
            id: "budget_label".to_string(),
            field: FieldName::Budget,
            pattern: r"budget[:\s]+(\d+)".to_string(),
        },
        RuleDef {
            id: "budget_currency_marker".to_string(),
            field: FieldName::Budget,
            pattern: r"(\d+)\s*(?:dollars?|usd|\$)".to_string(),
        },
        RuleDef {
            id: "budget_of_phrase".to_string(),
            field: FieldName::Budget,
            pattern: r"budget\s+of\s+(\d+)".to_string(),
        },
    ]
}

/// Deadline recognition: ISO dates, optionally labeled.
fn deadline_rules() -> Vec<RuleDef> {
    vec![
        RuleDef {
            id: "deadline_label".to_string(),
            field: FieldName::Deadline,
            pattern: r"deadline[:\s]+(\d{4}-\d{2}-\d{2})".to_string(),
        },
        RuleDef {
            id: "deadline_bare_date".to_string(),
            field: FieldName::Deadline,
            pattern: r"(\d{4}-\d{2}-\d{2})".to_string(),
        },
        RuleDef {
            id: "deadline_of_phrase".to_string(),
            field: FieldName::Deadline,
            pattern: r"deadline\s+of\s+(\d{4}-\d{2}-\d{2})".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_rule_def_build() {
        let def = RuleDef {
            id: "test".to_string(),
            field: FieldName::Company,
            pattern: r"client[:\s]+(\w+)".to_string(),
        };

        let rule = def.build().expect("valid rule should build");
        assert_eq!(rule.field, FieldName::Company);
        assert_eq!(rule.attempt_match("client: acme").as_deref(), Some("acme"));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let def = RuleDef {
            id: "broken".to_string(),
            field: FieldName::Budget,
            pattern: r"budget[:(\d+".to_string(),
        };
        assert!(matches!(def.build(), Err(BuildError::Regex(_))));
    }

    #[test]
    fn test_missing_capture_group_rejected() {
        let def = RuleDef {
            id: "no_capture".to_string(),
            field: FieldName::Budget,
            pattern: r"budget\s+\d+".to_string(),
        };
        assert!(matches!(def.build(), Err(BuildError::Capture(_))));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_defaults_compile_in_canonical_field_order() {
        let rules = default_rules();
        assert_eq!(rules.len(), 9);
        for def in &rules {
            def.build().expect("default rule should compile");
        }

        // Per-field priority order is the declaration order.
        let company_ids: Vec<&str> = rules
            .iter()
            .filter(|r| r.field == FieldName::Company)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(
            company_ids,
            vec!["company_request_verb", "company_label", "client_label"]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_rule_def_serialization() {
        let def = RuleDef {
            id: "test".to_string(),
            field: FieldName::Deadline,
            pattern: r"(\d{4}-\d{2}-\d{2})".to_string(),
        };

        let json = serde_json::to_string(&def).expect("rule should serialize");
        let deserialized: RuleDef =
            serde_json::from_str(&json).expect("valid JSON should deserialize");

        assert_eq!(deserialized.id, def.id);
        assert_eq!(deserialized.field, FieldName::Deadline);
        assert_eq!(deserialized.pattern, def.pattern);
    }
}
