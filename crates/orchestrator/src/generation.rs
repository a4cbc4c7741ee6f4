//! Generation client: bounded, validated calls to the provider.

use std::sync::Arc;
use std::time::Duration;

use brain_core::{Brain, Completion, CompletionRequest};
use tracing::{debug, warn};

use crate::error::EngineError;

/// Wraps an optional provider with a timeout and output validation.
#[derive(Clone)]
pub struct GenerationClient {
    brain: Option<Arc<dyn Brain>>,
    timeout: Duration,
}

impl GenerationClient {
    pub fn new(brain: Arc<dyn Brain>, timeout: Duration) -> Self {
        Self {
            brain: Some(brain),
            timeout,
        }
    }

    /// A client with no provider; every call fails with
    /// [`EngineError::ProviderUnavailable`].
    pub fn unconfigured() -> Self {
        Self {
            brain: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.brain.is_some()
    }

    /// Provider name, if configured.
    pub fn provider_name(&self) -> Option<&str> {
        self.brain.as_deref().map(|b| b.name())
    }

    /// Generate one reply. The text is returned unchanged.
    pub async fn generate(&self, request: CompletionRequest) -> Result<Completion, EngineError> {
        let brain = self.brain.as_ref().ok_or(EngineError::ProviderUnavailable)?;

        let completion = match tokio::time::timeout(self.timeout, brain.complete(request)).await {
            Ok(Ok(completion)) => completion,
            Ok(Err(e)) => {
                warn!(provider = brain.name(), "Generation failed: {}", e);
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    provider = brain.name(),
                    "Generation timed out after {:?}", self.timeout
                );
                return Err(EngineError::GenerationFailed(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if completion.is_blank() {
            warn!(provider = brain.name(), "Generation returned a blank completion");
            return Err(EngineError::EmptyGeneration);
        }

        debug!(
            provider = brain.name(),
            model = %completion.model,
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            "Generation complete"
        );
        Ok(completion)
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("provider", &self.provider_name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::ChatTurn;
    use mock_brain::{DelayedBrain, ScriptedBrain, ScriptedReply};

    fn request() -> CompletionRequest {
        CompletionRequest::new("system", vec![ChatTurn::customer("hi")], 50)
    }

    #[tokio::test]
    async fn test_unconfigured() {
        let client = GenerationClient::unconfigured();
        assert!(!client.is_configured());
        let err = client.generate(request()).await.unwrap_err();
        assert!(matches!(err, EngineError::ProviderUnavailable));
    }

    #[tokio::test]
    async fn test_success_is_unchanged() {
        let brain = Arc::new(ScriptedBrain::replying("  Sure, what vehicle?  "));
        let client = GenerationClient::new(brain.clone(), Duration::from_secs(5));
        let completion = client.generate(request()).await.unwrap();
        assert_eq!(completion.text, "  Sure, what vehicle?  ");
        assert_eq!(brain.calls(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_distinguished() {
        let client = GenerationClient::new(
            Arc::new(ScriptedBrain::unreachable()),
            Duration::from_secs(5),
        );
        let err = client.generate(request()).await.unwrap_err();
        assert_eq!(err.code(), "generation_failed");

        let client = GenerationClient::new(
            Arc::new(ScriptedBrain::new(ScriptedReply::ApiError("500".into()))),
            Duration::from_secs(5),
        );
        assert_eq!(client.generate(request()).await.unwrap_err().code(), "generation_failed");

        let client = GenerationClient::new(Arc::new(ScriptedBrain::blank()), Duration::from_secs(5));
        assert_eq!(client.generate(request()).await.unwrap_err().code(), "empty_response");
    }

    #[tokio::test]
    async fn test_timeout() {
        let slow = DelayedBrain::with_millis(ScriptedBrain::replying("late"), 500);
        let client = GenerationClient::new(Arc::new(slow), Duration::from_millis(20));
        let err = client.generate(request()).await.unwrap_err();
        assert!(matches!(err, EngineError::GenerationFailed(_)));
    }
}
