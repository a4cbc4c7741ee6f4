//! Echo brain implementation - replies with the latest customer turn.

use async_trait::async_trait;
use brain_core::{Brain, BrainError, ChatRole, Completion, CompletionRequest, Usage};

/// A brain that echoes the most recent customer turn back.
///
/// Useful for testing the message flow without any generation backend.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will respond with "Echo: <latest customer turn>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        let latest = request
            .transcript
            .iter()
            .rev()
            .find(|turn| turn.role == ChatRole::Customer)
            .map(|turn| turn.content.as_str())
            .unwrap_or_default();

        let text = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, latest),
            None => latest.to_string(),
        };

        let usage = Usage::new(
            request.system_prompt.split_whitespace().count() as u32,
            text.split_whitespace().count() as u32,
        );

        Ok(Completion::new(text, "echo", usage))
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::ChatTurn;

    #[tokio::test]
    async fn test_echo_latest_customer_turn() {
        let brain = EchoBrain::new();
        let request = CompletionRequest::new(
            "sys",
            vec![
                ChatTurn::customer("first"),
                ChatTurn::assistant("reply"),
                ChatTurn::customer("second"),
            ],
            50,
        );

        let completion = brain.complete(request).await.unwrap();
        assert_eq!(completion.text, "second");
        assert_eq!(completion.model, "echo");
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let brain = EchoBrain::with_prefix("Echo: ");
        let request = CompletionRequest::new("sys", vec![ChatTurn::customer("Hello!")], 50);

        let completion = brain.complete(request).await.unwrap();
        assert_eq!(completion.text, "Echo: Hello!");
    }

    #[tokio::test]
    async fn test_brain_is_ready() {
        let brain = EchoBrain::new();
        assert_eq!(brain.name(), "EchoBrain");
        assert!(brain.is_ready().await);
    }
}
