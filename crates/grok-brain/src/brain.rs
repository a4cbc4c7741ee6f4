//! GrokBrain implementation using xAI API.

use brain_core::{async_trait, Brain, BrainError, Completion, CompletionRequest, Usage};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::GrokBrainConfig;

/// A generation provider backed by xAI's Grok chat-completions API.
///
/// GrokBrain is stateless: the caller supplies the full system prompt and
/// transcript on every call.
pub struct GrokBrain {
    client: Client,
    config: GrokBrainConfig,
}

impl GrokBrain {
    /// Create a new GrokBrain with the given configuration.
    pub fn new(config: GrokBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "GrokBrain initialized with model: {}, timeout: {:?}",
            config.model, config.request_timeout
        );

        Ok(Self { client, config })
    }

    /// Create a GrokBrain from environment variables.
    ///
    /// See [`GrokBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        let config = GrokBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GrokBrainConfig {
        &self.config
    }

    /// Make a chat completion request to the xAI API.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = self.config.completions_url();

        debug!(
            "Sending request to xAI API: model={}, messages={}, max_tokens={}",
            request.model,
            request.messages.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BrainError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for GrokBrain {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        let api_request =
            ChatCompletionRequest::from_request(&self.config.model, &request, self.config.temperature);

        let response = self.chat_completion(&api_request).await?;
        into_completion(response)
    }

    fn name(&self) -> &str {
        "GrokBrain"
    }
}

/// Convert an API response into a completion, rejecting blank output.
fn into_completion(response: ChatCompletionResponse) -> Result<Completion, BrainError> {
    let usage = response
        .usage
        .as_ref()
        .map(|u| Usage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    if let Some(choice) = response.choices.first() {
        debug!("Finish reason: {:?}", choice.finish_reason);
    }

    let text = match response.first_text() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => {
            warn!("No content in response from {}", response.model);
            return Err(BrainError::EmptyResponse);
        }
    };

    debug!(
        "Token usage - prompt: {}, completion: {}",
        usage.prompt_tokens, usage.completion_tokens
    );

    Ok(Completion::new(text, response.model, usage))
}
