//! Mock generation providers for testing.
//!
//! This crate provides mock implementations of the `Brain` trait:
//! - `EchoBrain` - Replies with the latest customer turn
//! - `ScriptedBrain` - Replays queued replies and failures, counting calls
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For production generation, use the `grok-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, ChatTurn, CompletionRequest, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::replying("Happy to help!");
//!
//!     let request = CompletionRequest::new("sys", vec![ChatTurn::customer("Hi")], 100);
//!     let completion = brain.complete(request).await?;
//!     assert_eq!(completion.text, "Happy to help!");
//!     assert_eq!(brain.calls(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, Brain, BrainError, ChatRole, ChatTurn, Completion, CompletionRequest, Usage,
};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use scripted::{ScriptedBrain, ScriptedReply};
