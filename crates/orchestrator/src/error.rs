//! Error types for decision engine operations.

use brain_core::BrainError;
use database::DatabaseError;
use thiserror::Error;

/// Errors that end an engine invocation without a decision.
///
/// Skips and escalations are decisions, not errors; see
/// [`Decision`](crate::Decision).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The trigger payload is malformed.
    #[error("invalid trigger: {0}")]
    InvalidTrigger(String),

    /// The conversation does not exist in this organization.
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    /// Another invocation advanced the thread's turn count first.
    #[error("conversation {0} was updated concurrently")]
    TurnConflict(String),

    /// No generation provider is configured.
    #[error("generation provider not configured")]
    ProviderUnavailable,

    /// The provider could not be reached, errored, or timed out.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// The provider returned a blank completion.
    #[error("generation returned an empty response")]
    EmptyGeneration,

    /// The config store failed.
    #[error("store error: {0}")]
    Store(DatabaseError),
}

impl EngineError {
    /// HTTP status reported to the trigger source.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::InvalidTrigger(_) => 400,
            EngineError::ConversationNotFound(_) => 404,
            EngineError::TurnConflict(_) => 409,
            EngineError::ProviderUnavailable => 503,
            EngineError::GenerationFailed(_) | EngineError::EmptyGeneration => 502,
            EngineError::Store(_) => 500,
        }
    }

    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidTrigger(_) => "invalid_trigger",
            EngineError::ConversationNotFound(_) => "conversation_not_found",
            EngineError::TurnConflict(_) => "turn_conflict",
            EngineError::ProviderUnavailable => "provider_unavailable",
            EngineError::GenerationFailed(_) => "generation_failed",
            EngineError::EmptyGeneration => "empty_response",
            EngineError::Store(_) => "store_error",
        }
    }
}

impl From<DatabaseError> for EngineError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict { id, .. } => EngineError::TurnConflict(id),
            DatabaseError::Validation(e) => EngineError::InvalidTrigger(e.to_string()),
            other => EngineError::Store(other),
        }
    }
}

impl From<BrainError> for EngineError {
    fn from(err: BrainError) -> Self {
        match err {
            BrainError::Configuration(_) => EngineError::ProviderUnavailable,
            BrainError::EmptyResponse => EngineError::EmptyGeneration,
            other => EngineError::GenerationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(EngineError::InvalidTrigger("x".into()).status_code(), 400);
        assert_eq!(EngineError::ProviderUnavailable.status_code(), 503);
        assert_eq!(EngineError::EmptyGeneration.status_code(), 502);
        assert_eq!(EngineError::GenerationFailed("x".into()).status_code(), 502);
        assert_eq!(EngineError::TurnConflict("c".into()).status_code(), 409);
    }

    #[test]
    fn test_brain_error_mapping() {
        let err: EngineError = BrainError::Timeout.into();
        assert_eq!(err.code(), "generation_failed");

        let err: EngineError = BrainError::EmptyResponse.into();
        assert_eq!(err.code(), "empty_response");

        let err: EngineError = BrainError::Configuration("no key".into()).into();
        assert!(matches!(err, EngineError::ProviderUnavailable));
    }

    #[test]
    fn test_conflict_maps_to_turn_conflict() {
        let err: EngineError = DatabaseError::Conflict {
            entity: "ThreadOverride",
            id: "conv-1".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::TurnConflict(ref id) if id == "conv-1"));
    }
}
