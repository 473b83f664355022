#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use std::sync::Arc;

pub mod compose;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod validate;

pub use compose::Composer;
pub use error::{ExtractError, PipelineError};
pub use pipeline::{Pipeline, RunState};
pub use types::{ExtractedFields, FieldName, ParseFieldError};
pub use validate::{ValidationOutcome, ValidationStatus, Validator};

/// Capability for locating field values in a document.
///
/// Implementations must distinguish a malformed response
/// (`ExtractError::MalformedResponse`) from fields that were simply not
/// found: a field that is not found is absent from the returned mapping,
/// never an error.
#[async_trait]
pub trait Extract: Send + Sync {
    async fn extract(&self, document: &str) -> Result<ExtractedFields, ExtractError>;
}

/// Synchronous variant of [`Extract`] for implementations that need no I/O.
///
/// The pipeline offers a blocking `process_sync` path when its extractor
/// implements this trait.
pub trait ExtractSync: Send + Sync {
    fn extract_sync(&self, document: &str) -> Result<ExtractedFields, ExtractError>;
}

#[async_trait]
impl<T: Extract + ?Sized> Extract for Arc<T> {
    async fn extract(&self, document: &str) -> Result<ExtractedFields, ExtractError> {
        (**self).extract(document).await
    }
}

impl<T: ExtractSync + ?Sized> ExtractSync for Arc<T> {
    fn extract_sync(&self, document: &str) -> Result<ExtractedFields, ExtractError> {
        (**self).extract_sync(document)
    }
}
