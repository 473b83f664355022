//! Requiredness validation of extracted fields.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ExtractedFields, FieldName};

/// Completeness classification of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// Every required field was found with a non-blank value.
    Complete,
    /// Some, but not all, required fields were found.
    Partial,
    /// No required field was found.
    Empty,
}

impl ValidationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Empty => "empty",
        }
    }
}

/// Result of checking extracted fields against the required list.
///
/// Invariant: `extracted_count + missing_fields.len() == total_required`,
/// and `missing_fields` preserves required-list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub status: ValidationStatus,
    pub missing_fields: Vec<FieldName>,
    pub extracted_count: usize,
    pub total_required: usize,
}

impl ValidationOutcome {
    /// Conservative fallback shape: every required field reported missing.
    ///
    /// Used as the initial run-state value and as the terminal-error
    /// outcome; never an inconsistent partial result.
    #[must_use]
    pub fn all_missing(required: &[FieldName]) -> Self {
        Self {
            status: ValidationStatus::Empty,
            missing_fields: required.to_vec(),
            extracted_count: 0,
            total_required: required.len(),
        }
    }
}

/// Classifies extracted-field mappings against a fixed required list.
///
/// Holds only read-only configuration, so a single validator may be shared
/// across concurrent pipeline runs.
#[derive(Debug, Clone)]
pub struct Validator {
    required: Vec<FieldName>,
}

impl Validator {
    #[must_use]
    pub const fn new(required: Vec<FieldName>) -> Self {
        Self { required }
    }

    /// Validator over the canonical three-field required set.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FieldName::ALL.to_vec())
    }

    #[must_use]
    pub fn required(&self) -> &[FieldName] {
        &self.required
    }

    /// Check which required fields are present.
    ///
    /// A field counts as missing when it is absent from `extracted` or
    /// present with a value that is blank after trimming.
    #[must_use]
    pub fn validate(&self, extracted: &ExtractedFields) -> ValidationOutcome {
        let missing_fields: Vec<FieldName> = self
            .required
            .iter()
            .copied()
            .filter(|field| {
                extracted
                    .get(*field)
                    .is_none_or(|value| value.trim().is_empty())
            })
            .collect();

        let total_required = self.required.len();
        let status = if missing_fields.is_empty() {
            ValidationStatus::Complete
        } else if missing_fields.len() < total_required {
            ValidationStatus::Partial
        } else {
            ValidationStatus::Empty
        };

        debug!(
            "Validation: status={}, missing={}/{total_required}",
            status.as_str(),
            missing_fields.len()
        );

        ValidationOutcome {
            status,
            extracted_count: total_required - missing_fields.len(),
            missing_fields,
            total_required,
        }
    }
}
