//! Configuration types for sms-gateway.

use std::env;

use secrecy::SecretString;

use crate::error::GatewayError;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.twilio.com";

/// Configuration for connecting to the messaging gateway.
#[derive(Debug)]
pub struct GatewayConfig {
    /// Base URL of the REST API (e.g., "https://api.twilio.com").
    pub base_url: String,
    /// Account identifier, also the basic-auth user.
    pub account_sid: String,
    /// Auth token, the basic-auth password.
    pub auth_token: SecretString,
    /// Sender phone number in E.164 form.
    pub from_number: String,
}

impl GatewayConfig {
    /// Create a new configuration against the default API URL.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            account_sid: account_sid.into(),
            auth_token: SecretString::from(auth_token.into()),
            from_number: from_number.into(),
        }
    }

    /// Point the configuration at a different API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SMS_ACCOUNT_SID` | Account identifier | (none) |
    /// | `SMS_AUTH_TOKEN` | Auth token | (none) |
    /// | `SMS_FROM_NUMBER` | Sender number | (none) |
    /// | `SMS_API_URL` | API base URL | `https://api.twilio.com` |
    ///
    /// Returns `Ok(None)` when none of the three credentials are set, so the
    /// caller can fall back to a log-only sender. A partial set is an error.
    pub fn from_env() -> Result<Option<Self>, GatewayError> {
        let read = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        let account_sid = read("SMS_ACCOUNT_SID");
        let auth_token = read("SMS_AUTH_TOKEN");
        let from_number = read("SMS_FROM_NUMBER");

        match (account_sid, auth_token, from_number) {
            (None, None, None) => Ok(None),
            (Some(sid), Some(token), Some(from)) => {
                let base_url = read("SMS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
                Ok(Some(Self::new(sid, token, from).with_base_url(base_url)))
            }
            _ => Err(GatewayError::Config(
                "SMS_ACCOUNT_SID, SMS_AUTH_TOKEN and SMS_FROM_NUMBER must be set together"
                    .to_string(),
            )),
        }
    }

    /// Get the messages endpoint URL.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}
