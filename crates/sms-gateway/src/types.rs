//! Types returned by the messaging gateway.

use serde::Deserialize;

/// Result of queuing a message with the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResult {
    /// Gateway-assigned message identifier.
    pub sid: String,

    /// Delivery status at the time of the response (e.g., "queued").
    #[serde(default)]
    pub status: Option<String>,

    /// Destination number as the gateway understood it.
    #[serde(default)]
    pub to: Option<String>,
}

/// Error body returned on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}
