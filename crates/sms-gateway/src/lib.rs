//! SMS messaging gateway client library.
//!
//! This crate provides a Rust client for sending SMS through a
//! Twilio-compatible Messages REST API. It supports:
//!
//! - Sending a text message to a phone number
//! - Loading credentials from the environment, with "not configured" as a
//!   first-class state rather than an error
//! - Normalizing loosely formatted phone numbers to E.164
//!
//! # Example
//!
//! ```no_run
//! use sms_gateway::{GatewayConfig, SmsClient};
//!
//! # async fn example() -> Result<(), sms_gateway::GatewayError> {
//! match GatewayConfig::from_env()? {
//!     Some(config) => {
//!         let client = SmsClient::new(config)?;
//!         let result = client.send_text("+15551234567", "Your wrap is ready!").await?;
//!         println!("Queued as {}", result.sid);
//!     }
//!     None => println!("SMS gateway not configured"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod phone;
pub mod types;

pub use client::SmsClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use phone::normalize_phone;
pub use types::SendResult;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
