//! xAI API request and response types.

use brain_core::{ChatTurn, CompletionRequest};
use serde::{Deserialize, Serialize};

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for ChatMessage {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role.api_role().to_string(),
            content: turn.content.clone(),
        }
    }
}

/// Chat completion request to xAI API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Build an API request from a provider-neutral completion request.
    ///
    /// The system prompt always comes first, followed by the transcript in
    /// order.
    pub fn from_request(
        model: impl Into<String>,
        request: &CompletionRequest,
        temperature: Option<f32>,
    ) -> Self {
        let mut messages = Vec::with_capacity(request.transcript.len() + 1);
        messages.push(ChatMessage::system(request.system_prompt.clone()));
        messages.extend(request.transcript.iter().map(ChatMessage::from));

        Self {
            model: model.into(),
            messages,
            max_tokens: request.max_tokens,
            temperature,
        }
    }
}

/// Chat completion response from xAI API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Model used
    pub model: String,
    /// Response choices
    pub choices: Vec<Choice>,
    /// Token usage
    pub usage: Option<ApiUsage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message
    pub message: ResponseMessage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Content (may be null)
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error details
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    /// Error message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_puts_system_prompt_first() {
        let request = CompletionRequest::new(
            "Be brief.",
            vec![
                ChatTurn::customer("Hi, I want a wrap quote"),
                ChatTurn::assistant("Happy to help! What vehicle?"),
                ChatTurn::customer("A 2021 Tacoma"),
            ],
            256,
        );

        let api = ChatCompletionRequest::from_request("grok-test", &request, Some(0.4));
        let roles: Vec<&str> = api.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(api.messages[0].content, "Be brief.");
        assert_eq!(api.max_tokens, 256);

        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["model"], "grok-test");
        assert_eq!(json["max_tokens"], 256);
    }

    #[test]
    fn test_request_omits_unset_temperature() {
        let request = CompletionRequest::new("sys", vec![ChatTurn::customer("hi")], 64);
        let api = ChatCompletionRequest::from_request("grok-test", &request, None);
        let json = serde_json::to_value(&api).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "id": "abc",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "grok-4-1-fast",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Sure thing!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 210, "completion_tokens": 12, "total_tokens": 222}
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), Some("Sure thing!"));
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 210);
        assert_eq!(usage.completion_tokens, 12);
    }

    #[test]
    fn test_parse_response_null_content() {
        let body = r#"{
            "model": "grok-4-1-fast",
            "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "length"}]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), None);
        assert!(response.usage.is_none());
    }
}
