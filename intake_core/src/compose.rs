//! Response synthesis from a validation outcome.

use std::fmt::Write;

use crate::types::{ExtractedFields, FieldName};
use crate::validate::{ValidationOutcome, ValidationStatus};

/// Turns a validation outcome plus extracted values into report text.
///
/// One literal template per status. Composition is the only stage whose
/// internal failure becomes user-visible text: there is no later stage to
/// fall back to, so the pipeline surfaces the error string directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Composer;

impl Composer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn compose(
        self,
        outcome: &ValidationOutcome,
        extracted: &ExtractedFields,
    ) -> Result<String, std::fmt::Error> {
        match outcome.status {
            ValidationStatus::Complete => Self::compose_complete(extracted),
            ValidationStatus::Partial => Self::compose_partial(outcome, extracted),
            ValidationStatus::Empty => Self::compose_empty(outcome),
        }
    }

    fn compose_complete(extracted: &ExtractedFields) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "✅ All required fields extracted successfully!")?;
        writeln!(out)?;
        writeln!(out, "Extracted fields:")?;
        for (field, value) in extracted.iter() {
            writeln!(out, "- {field}: {value}")?;
        }
        Ok(out)
    }

    fn compose_partial(
        outcome: &ValidationOutcome,
        extracted: &ExtractedFields,
    ) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "⚠️  Partial extraction completed.")?;
        writeln!(out)?;
        writeln!(out, "Extracted fields:")?;
        // Present-but-blank entries are silently skipped from this listing;
        // they already appear in the missing list below.
        for (field, value) in extracted.iter() {
            if !value.trim().is_empty() {
                writeln!(out, "- {field}: {value}")?;
            }
        }
        writeln!(out)?;
        write!(
            out,
            "Missing required fields: {}",
            join_fields(&outcome.missing_fields)
        )?;
        Ok(out)
    }

    fn compose_empty(outcome: &ValidationOutcome) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "❌ Field extraction failed.")?;
        writeln!(out)?;
        writeln!(
            out,
            "Missing all required fields: {}",
            join_fields(&outcome.missing_fields)
        )?;
        writeln!(out)?;
        write!(
            out,
            "The document may not contain the required information or the \
             extraction process encountered an error."
        )?;
        Ok(out)
    }
}

fn join_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .copied()
        .map(FieldName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
