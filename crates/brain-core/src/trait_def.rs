//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::{Completion, CompletionRequest};

/// A language-generation provider.
///
/// Implementations range from scripted test doubles to HTTP-backed models.
/// This trait is object-safe and is usually held as `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Generate one reply for the given prompt.
    ///
    /// Implementations return the text unchanged; callers decide what counts
    /// as usable output. A provider that knows it produced nothing should
    /// return [`BrainError::EmptyResponse`].
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;

    /// Check if the provider is ready to take requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
