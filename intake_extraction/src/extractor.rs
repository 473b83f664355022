//! Pattern-matching extractor: ordered recognition rules per field.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use intake_core::{Extract, ExtractError, ExtractSync, ExtractedFields, FieldName};

use crate::rules::{BuildError, FieldRule, RuleDef, default_rules};

/// Configuration for the pattern extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Recognition rules to apply, in priority order per field.
    pub rules: Vec<RuleDef>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// Extractor that locates field values with ordered regex rules.
///
/// The document is lowercased once, then for each field its rules are
/// tried in priority order and the first match wins; remaining rules for
/// that field are skipped. Rules are compiled at construction, so
/// extraction itself never fails: a document nothing matches simply
/// yields an empty mapping.
pub struct PatternExtractor {
    /// Compiled rules grouped per field, in canonical field order.
    rules: Vec<(FieldName, Vec<FieldRule>)>,
}

impl PatternExtractor {
    /// Create an extractor from configuration.
    ///
    /// # Errors
    /// Returns an error if rule compilation fails.
    pub fn new(config: ExtractorConfig) -> Result<Self, BuildError> {
        let compiled = config
            .rules
            .iter()
            .map(RuleDef::build)
            .collect::<Result<Vec<_>, _>>()?;

        let rules = FieldName::ALL
            .iter()
            .map(|field| {
                let for_field: Vec<FieldRule> = compiled
                    .iter()
                    .filter(|rule| rule.field == *field)
                    .cloned()
                    .collect();
                (*field, for_field)
            })
            .collect();

        Ok(Self { rules })
    }

    /// Create an extractor with the default recognition table.
    ///
    /// # Errors
    /// Returns an error if default rule compilation fails.
    pub fn with_defaults() -> Result<Self, BuildError> {
        Self::new(ExtractorConfig::default())
    }

    /// Extract fields from a document.
    #[must_use]
    pub fn extract(&self, document: &str) -> ExtractedFields {
        let haystack = document.to_lowercase();
        let mut fields = ExtractedFields::new();

        for (field, rules) in &self.rules {
            for rule in rules {
                if let Some(raw) = rule.attempt_match(&haystack) {
                    fields.insert(*field, normalize(*field, &raw));
                    break;
                }
            }
        }

        debug!(
            "Pattern extraction found {} of {} fields",
            fields.len(),
            self.rules.len()
        );

        fields
    }
}

/// Re-shape a raw capture into its presented form.
fn normalize(field: FieldName, raw: &str) -> String {
    match field {
        // Matching runs on lowercased text; restore title casing.
        FieldName::Company => title_case(raw),
        FieldName::Budget => format!("${raw}"),
        FieldName::Deadline => raw.to_string(),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Extract for PatternExtractor {
    async fn extract(&self, document: &str) -> Result<ExtractedFields, ExtractError> {
        Ok(Self::extract(self, document))
    }
}

impl ExtractSync for PatternExtractor {
    fn extract_sync(&self, document: &str) -> Result<ExtractedFields, ExtractError> {
        Ok(self.extract(document))
    }
}
