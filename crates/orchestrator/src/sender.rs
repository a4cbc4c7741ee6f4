//! Message sender trait and implementations.

use async_trait::async_trait;
use sms_gateway::{GatewayError, SmsClient};

/// What happened to an outbound message at the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the gateway.
    Sent { id: String },
    /// No transport configured; the message was only logged.
    LoggedOnly,
}

/// Trait for delivering text messages to customers.
///
/// Abstracted to support different transports (SMS, tests, etc.)
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send a text message.
    ///
    /// # Arguments
    /// * `to` - Destination phone number
    /// * `body` - Message content
    async fn send_text(&self, to: &str, body: &str) -> Result<Delivery, GatewayError>;
}

/// Sender used when no gateway credentials are configured. Logs every
/// message and reports it as not sent.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl MessageSender for LoggingSender {
    async fn send_text(&self, to: &str, body: &str) -> Result<Delivery, GatewayError> {
        tracing::info!(to, "Gateway not configured, message logged, not sent: {}", body);
        Ok(Delivery::LoggedOnly)
    }
}

/// Sender backed by the SMS gateway.
#[derive(Debug, Clone)]
pub struct SmsSender {
    client: SmsClient,
}

impl SmsSender {
    pub fn new(client: SmsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageSender for SmsSender {
    async fn send_text(&self, to: &str, body: &str) -> Result<Delivery, GatewayError> {
        let result = self.client.send_text(to, body).await?;
        Ok(Delivery::Sent { id: result.sid })
    }
}
