//! xAI Grok-based generation provider.
//!
//! This crate provides a [`Brain`] implementation that sends a composed
//! prompt to the xAI chat-completions API and returns the reply text with its
//! token usage.
//!
//! # Features
//!
//! - Stateless: every call carries its own system prompt and transcript
//! - Bounded output via the request's `max_tokens`
//! - Per-request HTTP timeout
//! - Distinguishes unreachable/error responses from empty completions
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use grok_brain::{Brain, ChatTurn, CompletionRequest, GrokBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GrokBrain::from_env()?;
//!     let request = CompletionRequest::new(
//!         "You are a helpful assistant for a vehicle wrap shop.",
//!         vec![ChatTurn::customer("How long does a full wrap take?")],
//!         300,
//!     );
//!     let completion = brain.complete(request).await?;
//!     println!("{}", completion.text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GrokBrain;
pub use config::{GrokBrainConfig, GrokBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, Brain, BrainError, ChatRole, ChatTurn, Completion, CompletionRequest, Usage,
};
