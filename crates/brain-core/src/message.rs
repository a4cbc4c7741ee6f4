//! Request and response types shared by all providers.

use serde::{Deserialize, Serialize};

/// Who authored a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The customer on the other end of the thread.
    Customer,
    /// A previous reply from the business side.
    Assistant,
}

impl ChatRole {
    /// Wire role used by chat-completion style APIs.
    pub fn api_role(&self) -> &'static str {
        match self {
            ChatRole::Customer => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single role-tagged transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    /// Create a customer turn.
    pub fn customer(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Customer,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a provider needs to produce one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Instruction block sent ahead of the transcript.
    pub system_prompt: String,
    /// Oldest-first transcript. Never empty when built by the engine.
    pub transcript: Vec<ChatTurn>,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, transcript: Vec<ChatTurn>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            transcript,
            max_tokens,
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Total tokens billed for the call.
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Generated text, exactly as the provider returned it.
    pub text: String,
    /// Model that produced the text.
    pub model: String,
    pub usage: Usage,
}

impl Completion {
    pub fn new(text: impl Into<String>, model: impl Into<String>, usage: Usage) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            usage,
        }
    }

    /// Whether the completion carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
