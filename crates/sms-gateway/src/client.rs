//! Messaging gateway HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::phone::normalize_phone;
use crate::types::{ApiErrorBody, SendResult};

/// Client for sending SMS through the gateway.
#[derive(Debug, Clone)]
pub struct SmsClient {
    http: Client,
    config: Arc<GatewayConfig>,
}

impl SmsClient {
    /// Create a client for the given configuration.
    ///
    /// No request is made until the first send.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        if config.account_sid.trim().is_empty() {
            return Err(GatewayError::Config("account SID is empty".to_string()));
        }
        let from = normalize_phone(&config.from_number).ok_or_else(|| {
            GatewayError::Config(format!("invalid sender number: {}", config.from_number))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(GatewayError::Http)?;

        info!("SMS gateway client ready (from {})", from);

        Ok(Self {
            http,
            config: Arc::new(GatewayConfig {
                from_number: from,
                ..config
            }),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send a text message to a phone number.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SendResult, GatewayError> {
        let to = normalize_phone(to).ok_or_else(|| GatewayError::InvalidRecipient(to.to_string()))?;
        let url = self.config.messages_url();
        debug!("Sending SMS to {} ({} chars)", to, body.chars().count());

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&[
                ("To", to.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let result: SendResult = serde_json::from_str(&text)?;
        debug!("SMS queued: sid={}, status={:?}", result.sid, result.status);
        Ok(result)
    }
}

/// Build an API error from a non-success response body.
fn api_error(status: u16, body: &str) -> GatewayError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.code {
            Some(code) => format!("{} (code {})", parsed.message, code),
            None => parsed.message,
        },
        Err(_) => body.to_string(),
    };
    GatewayError::Api { status, message }
}
