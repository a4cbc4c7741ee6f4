//! Error types for generation providers.

use thiserror::Error;

/// Errors that can occur while asking a provider for a completion.
///
/// Callers need to tell a provider that could not be reached apart from one
/// that answered with nothing, so those are separate variants.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The provider is missing credentials or could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status or an unreadable body.
    #[error("provider error: {0}")]
    ProcessingFailed(String),

    /// The provider answered successfully but produced no text.
    #[error("provider returned an empty completion")]
    EmptyResponse,

    /// The request did not finish in time.
    #[error("request timed out")]
    Timeout,
}
