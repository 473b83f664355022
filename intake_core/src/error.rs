//! Error taxonomy for the intake pipeline.
//!
//! Every stage absorbs its own internal errors and degrades to a
//! conservative output; the variants here record what happened inside
//! [`crate::RunState`] rather than aborting the run.

use thiserror::Error;

/// Stage-level failures recorded on the run envelope.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Response generation error: {0}")]
    Composition(String),

    #[error("Workflow failed: {0}")]
    Orchestration(String),
}

/// Failures surfaced by an [`crate::Extract`] implementation.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extractor produced output that could not be parsed into a
    /// field mapping. Distinct from "fields not found": not-found fields
    /// are simply absent from a successful result.
    #[error("Failed to parse extraction response: {0}")]
    MalformedResponse(String),

    /// The extractor's upstream collaborator failed (transport, auth,
    /// service errors).
    #[error("Extractor upstream error: {0}")]
    Upstream(#[from] anyhow::Error),
}
