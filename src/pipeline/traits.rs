//! Transform pipeline trait.

use crate::error::PipelineError;
use async_trait::async_trait;

/// An asynchronous CSS transform pipeline.
///
/// Implementations take one complete CSS text and resolve to the
/// transformed text. The relay treats the pipeline as an opaque
/// collaborator: it owns all parsing, transformation, and printing
/// semantics.
#[async_trait]
pub trait Transform: Send + Sync {
    /// Transforms one CSS text.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] when the pipeline cannot process the
    /// given input.
    async fn transform(&self, css: String) -> std::result::Result<String, PipelineError>;
}
