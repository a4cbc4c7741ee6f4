//! Error types for sms-gateway.

use thiserror::Error;

/// Errors that can occur when talking to the messaging gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway rejected the request.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The destination is not a usable phone number.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
