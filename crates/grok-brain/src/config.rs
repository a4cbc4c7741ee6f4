//! Configuration for GrokBrain.

use std::env;
use std::time::Duration;

use brain_core::BrainError;

/// Default xAI API URL.
pub const DEFAULT_API_URL: &str = "https://api.x.ai";

/// Default model name.
pub const DEFAULT_MODEL: &str = "grok-4-1-fast";

/// Configuration for GrokBrain.
#[derive(Debug, Clone)]
pub struct GrokBrainConfig {
    /// xAI API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl Default for GrokBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.7),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl GrokBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GROK_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GROK_API_URL` - API URL (default: https://api.x.ai)
    /// - `GROK_MODEL` - Model name (default: grok-4-1-fast)
    /// - `GROK_TEMPERATURE` - Temperature (default: 0.7)
    /// - `GROK_REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("GROK_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BrainError::Configuration("GROK_API_KEY not set".to_string()))?;

        let api_url = env::var("GROK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("GROK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = env::var("GROK_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let request_timeout = env::var("GROK_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            api_url,
            api_key,
            model,
            temperature,
            request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GrokBrainConfigBuilder {
        GrokBrainConfigBuilder::default()
    }

    /// Chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for GrokBrainConfig.
#[derive(Debug, Default)]
pub struct GrokBrainConfigBuilder {
    config: GrokBrainConfig,
}

impl GrokBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the HTTP request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GrokBrainConfig {
        self.config
    }
}
