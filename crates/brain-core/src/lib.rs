//! Core trait and types for generation providers.
//!
//! This crate provides the shared interface between the reply automation
//! engine and the language-generation backends it talks to. It defines:
//!
//! - [`Brain`] - The trait that all generation providers must implement
//! - [`CompletionRequest`] / [`Completion`] - Request and result types
//! - [`ChatTurn`] / [`ChatRole`] - Role-tagged transcript entries
//! - [`BrainError`] - Error types that keep "unreachable" and "empty"
//!   failures distinguishable
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, Completion, CompletionRequest, Usage};
//! use async_trait::async_trait;
//!
//! struct CannedBrain;
//!
//! #[async_trait]
//! impl Brain for CannedBrain {
//!     async fn complete(&self, _request: CompletionRequest) -> Result<Completion, BrainError> {
//!         Ok(Completion::new("Thanks for reaching out!", "canned", Usage::default()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedBrain"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use message::{ChatRole, ChatTurn, Completion, CompletionRequest, Usage};
pub use prompt::fingerprint_request;
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
