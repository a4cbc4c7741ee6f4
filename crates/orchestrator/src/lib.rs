//! Decision engine for automated conversation replies.
//!
//! This crate provides the [`DecisionEngine`] type which decides, for each
//! inbound trigger on a customer conversation, whether to skip automation,
//! hand the thread to a human, or generate and send one automated reply.
//!
//! # Architecture
//!
//! ```text
//! Trigger event (from the upstream webhook/dispatcher)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DECISION ENGINE                         │
//! │                                                             │
//! │  1. Rule resolver: enabled rule for org + trigger type      │
//! │         ↓                          (none → skipped)         │
//! │  2. Take the per-conversation lock                          │
//! │         ↓                                                   │
//! │  3. Escalation guard                                        │
//! │     • paused            → skipped, logged                   │
//! │     • turn limit        → escalated, reopened, logged       │
//! │     • keyword           → hand-off sent, reopened, logged   │
//! │         ↓                                                   │
//! │  4. Prompt composer: persona, goal, context, last ≤10 msgs  │
//! │         ↓                                                   │
//! │  5. Generation client: timeout, blank check                 │
//! │         ↓                                                   │
//! │  6. Dispatch: deliver, then message + log + turn in one tx  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use database::Database;
//! use orchestrator::{DecisionEngine, EngineConfig, GenerationClient, LoggingSender, TriggerEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:automation.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let config = EngineConfig::from_env()?;
//!     let brain = Arc::new(grok_brain::GrokBrain::from_env()?);
//!     let generation = GenerationClient::new(brain, config.generation_timeout);
//!     let engine = DecisionEngine::new(config, Arc::new(db), generation, Arc::new(LoggingSender));
//!
//!     let trigger = TriggerEvent::new("new_message", "conv-1").with_message("Hi!");
//!     println!("{:?}", engine.process(&trigger).await?);
//!     Ok(())
//! }
//! ```

mod composer;
mod config;
mod dispatch;
mod engine;
mod error;
mod generation;
mod guard;
mod locks;
mod persona;
mod resolver;
mod sender;
mod store;
mod trigger;

pub use composer::{
    compose, latest_inbound, ResolvedConfig, BUILTIN_ESCALATION_KEYWORDS, NEW_CONVERSATION_TURN,
};
pub use config::{ConfigError, EngineConfig, Pricing, DEFAULT_MAX_TURNS, MAX_HISTORY_WINDOW};
pub use dispatch::{DeliveryStatus, Dispatcher};
pub use engine::{DecisionEngine, KEYWORD_HOLD};
pub use error::EngineError;
pub use generation::GenerationClient;
pub use guard::{check as check_escalation, matched_keyword, Verdict};
pub use locks::ThreadLocks;
pub use persona::{Goal, Persona};
pub use resolver::resolve_rule;
pub use sender::{Delivery, LoggingSender, MessageSender, SmsSender};
pub use store::ConfigStore;
pub use trigger::{Decision, EscalationReason, SkipReason, TriggerContext, TriggerEvent};
