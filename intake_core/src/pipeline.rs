//! Pipeline orchestration: extraction, validation, response synthesis.
//!
//! The pipeline runs its three stages strictly in sequence for one
//! document and owns the per-run [`RunState`] envelope. A failing stage
//! degrades to a conservative output instead of halting later stages.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::compose::Composer;
use crate::error::PipelineError;
use crate::types::{ExtractedFields, FieldName};
use crate::validate::{ValidationOutcome, Validator};
use crate::{Extract, ExtractSync};

/// Per-invocation state envelope.
///
/// Created fresh for every `process` call, owned solely by the pipeline
/// while the run is in flight, and returned to the caller afterwards.
/// Nothing is persisted across calls.
#[derive(Debug, Clone)]
pub struct RunState {
    pub document: String,
    pub extracted: ExtractedFields,
    pub outcome: ValidationOutcome,
    pub response: String,
    /// Reserved for a caller-driven retry policy; the pipeline itself
    /// never increments it.
    pub attempts: u32,
    pub error: Option<PipelineError>,
    pub started_at: DateTime<Utc>,
}

impl RunState {
    fn new(document: &str, required: &[FieldName]) -> Self {
        Self {
            document: document.to_string(),
            extracted: ExtractedFields::new(),
            outcome: ValidationOutcome::all_missing(required),
            response: String::new(),
            attempts: 0,
            error: None,
            started_at: Utc::now(),
        }
    }

    /// Terminal shape for a catastrophic orchestration failure: generic
    /// failure message, full required list reported missing.
    #[must_use]
    pub fn failed(document: &str, required: &[FieldName], error: PipelineError) -> Self {
        let mut state = Self::new(document, required);
        state.response = error.to_string();
        state.error = Some(error);
        state
    }

    #[must_use]
    pub fn missing_fields(&self) -> &[FieldName] {
        &self.outcome.missing_fields
    }
}

/// Sequences extractor, validator, and composer over one document.
///
/// The extractor is any [`Extract`] capability chosen at construction;
/// pattern-matching and model-backed implementations are interchangeable
/// here. All configuration is read-only after construction, so a single
/// pipeline may serve concurrent independent runs.
pub struct Pipeline<E = Arc<dyn Extract>> {
    extractor: E,
    validator: Validator,
    composer: Composer,
}

impl<E> Pipeline<E> {
    #[must_use]
    pub const fn new(extractor: E, required: Vec<FieldName>) -> Self {
        Self {
            extractor,
            validator: Validator::new(required),
            composer: Composer::new(),
        }
    }

    #[must_use]
    pub fn required(&self) -> &[FieldName] {
        self.validator.required()
    }

    /// Validation stage. Pure given the extracted mapping; its
    /// conservative fallback (all required missing) is the initial
    /// envelope value, so a degraded run still carries a well-formed
    /// outcome.
    fn run_validate(&self, state: &mut RunState) {
        state.outcome = self.validator.validate(&state.extracted);
    }

    /// Composition stage. An internal composition error is the one
    /// failure that becomes user-visible text.
    fn run_compose(&self, state: &mut RunState) {
        match self.composer.compose(&state.outcome, &state.extracted) {
            Ok(response) => state.response = response,
            Err(e) => {
                let error = PipelineError::Composition(e.to_string());
                state.response = error.to_string();
                state.error = Some(error);
            }
        }
    }

    fn absorb_extraction_error(state: &mut RunState, message: String) {
        warn!("Extraction failed, continuing with empty fields: {message}");
        state.extracted = ExtractedFields::new();
        state.error = Some(PipelineError::Extraction(message));
    }
}

impl<E: Extract> Pipeline<E> {
    /// Process one document, suspending at each stage boundary.
    ///
    /// Stages run strictly in sequence; a stage's internal failure
    /// degrades its output and the pipeline still advances.
    pub async fn process(&self, document: &str) -> RunState {
        let mut state = RunState::new(document, self.validator.required());

        debug!("Pipeline start: document_len={}", document.len());

        match self.extractor.extract(document).await {
            Ok(extracted) => state.extracted = extracted,
            Err(e) => Self::absorb_extraction_error(&mut state, e.to_string()),
        }

        self.run_validate(&mut state);
        self.run_compose(&mut state);

        debug!(
            "Pipeline done: status={}, missing={}",
            state.outcome.status.as_str(),
            state.outcome.missing_fields.len()
        );

        state
    }
}

impl<E: ExtractSync> Pipeline<E> {
    /// Synchronous mode: stages run to completion on the calling thread.
    pub fn process_sync(&self, document: &str) -> RunState {
        let mut state = RunState::new(document, self.validator.required());

        match self.extractor.extract_sync(document) {
            Ok(extracted) => state.extracted = extracted,
            Err(e) => Self::absorb_extraction_error(&mut state, e.to_string()),
        }

        self.run_validate(&mut state);
        self.run_compose(&mut state);
        state
    }
}
