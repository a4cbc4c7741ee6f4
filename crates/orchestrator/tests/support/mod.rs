//! Shared helpers for engine integration tests.

use async_trait::async_trait;
use orchestrator::{Delivery, MessageSender};
use sms_gateway::GatewayError;
use tokio::sync::Mutex;

/// Sender that records messages in memory. Can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every send fails with a gateway error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// `(to, body)` pairs accepted so far.
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_text(&self, to: &str, body: &str) -> Result<Delivery, GatewayError> {
        if let Some(ref message) = self.fail_with {
            return Err(GatewayError::Api {
                status: 503,
                message: message.clone(),
            });
        }

        let mut sent = self.sent.lock().await;
        sent.push((to.to_string(), body.to_string()));
        Ok(Delivery::Sent {
            id: format!("rec-{}", sent.len()),
        })
    }
}
