//! Engine configuration.

use std::env;
use std::time::Duration;

use brain_core::Usage;
use thiserror::Error;

/// Turn bound used when neither the thread nor the rule sets one.
pub const DEFAULT_MAX_TURNS: i64 = 5;

/// Largest history window ever sent to the provider.
pub const MAX_HISTORY_WINDOW: i64 = 10;

const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_INPUT_COST_PER_MTOK: f64 = 0.20;
const DEFAULT_OUTPUT_COST_PER_MTOK: f64 = 0.50;

/// Sent to the customer when a keyword hands the thread to a person.
pub const DEFAULT_HANDOFF_MESSAGE: &str =
    "Thanks for your patience. I'm bringing in a member of our team, and they'll follow up with you shortly.";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Per-million-token prices used for cost accounting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_per_mtok: DEFAULT_INPUT_COST_PER_MTOK,
            output_per_mtok: DEFAULT_OUTPUT_COST_PER_MTOK,
        }
    }
}

impl Pricing {
    /// USD cost of one completion.
    pub fn cost(&self, usage: &Usage) -> f64 {
        (f64::from(usage.prompt_tokens) * self.input_per_mtok
            + f64::from(usage.completion_tokens) * self.output_per_mtok)
            / 1_000_000.0
    }
}

/// Configuration for the [`DecisionEngine`](crate::DecisionEngine).
///
/// The organization id is explicit so one process can host engines for
/// different tenants.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Organization whose rules apply.
    pub org_id: String,
    /// Turn bound when neither override nor rule sets one.
    pub default_max_turns: i64,
    /// Messages of history included in the prompt (at most 10).
    pub history_window: i64,
    /// Output bound passed to the provider.
    pub max_tokens: u32,
    /// Upper bound on one generation call.
    pub generation_timeout: Duration,
    pub pricing: Pricing,
    /// Text sent on keyword escalation.
    pub handoff_message: String,
}

impl EngineConfig {
    /// Create a configuration with defaults for everything but the org.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            default_max_turns: DEFAULT_MAX_TURNS,
            history_window: MAX_HISTORY_WINDOW,
            max_tokens: DEFAULT_MAX_TOKENS,
            generation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pricing: Pricing::default(),
            handoff_message: DEFAULT_HANDOFF_MESSAGE.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `AUTOMATION_ORG_ID`
    ///
    /// Optional:
    /// - `AUTOMATION_DEFAULT_MAX_TURNS` (default: 5)
    /// - `AUTOMATION_HISTORY_WINDOW` (default: 10, capped at 10)
    /// - `AUTOMATION_MAX_TOKENS` (default: 300)
    /// - `AUTOMATION_GENERATION_TIMEOUT_SECS` (default: 30)
    /// - `AUTOMATION_INPUT_COST_PER_MTOK` (default: 0.20)
    /// - `AUTOMATION_OUTPUT_COST_PER_MTOK` (default: 0.50)
    /// - `AUTOMATION_HANDOFF_MESSAGE`
    pub fn from_env() -> Result<Self, ConfigError> {
        let org_id = env::var("AUTOMATION_ORG_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("AUTOMATION_ORG_ID"))?;

        let mut config = Self::new(org_id.trim());

        if let Some(max_turns) = parse_var::<i64>("AUTOMATION_DEFAULT_MAX_TURNS")? {
            if max_turns < 0 {
                return Err(ConfigError::Invalid {
                    var: "AUTOMATION_DEFAULT_MAX_TURNS",
                    value: max_turns.to_string(),
                });
            }
            config.default_max_turns = max_turns;
        }
        if let Some(window) = parse_var::<i64>("AUTOMATION_HISTORY_WINDOW")? {
            config = config.with_history_window(window);
        }
        if let Some(max_tokens) = parse_var("AUTOMATION_MAX_TOKENS")? {
            config.max_tokens = max_tokens;
        }
        if let Some(secs) = parse_var("AUTOMATION_GENERATION_TIMEOUT_SECS")? {
            config.generation_timeout = Duration::from_secs(secs);
        }
        if let Some(price) = parse_var("AUTOMATION_INPUT_COST_PER_MTOK")? {
            config.pricing.input_per_mtok = price;
        }
        if let Some(price) = parse_var("AUTOMATION_OUTPUT_COST_PER_MTOK")? {
            config.pricing.output_per_mtok = price;
        }
        if let Ok(message) = env::var("AUTOMATION_HANDOFF_MESSAGE") {
            if !message.trim().is_empty() {
                config.handoff_message = message;
            }
        }

        Ok(config)
    }

    pub fn with_default_max_turns(mut self, max_turns: i64) -> Self {
        self.default_max_turns = max_turns.max(0);
        self
    }

    /// Set the history window, clamped to `1..=10`.
    pub fn with_history_window(mut self, window: i64) -> Self {
        self.history_window = window.clamp(1, MAX_HISTORY_WINDOW);
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_handoff_message(mut self, message: impl Into<String>) -> Self {
        self.handoff_message = message.into();
        self
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "AUTOMATION_ORG_ID",
        "AUTOMATION_DEFAULT_MAX_TURNS",
        "AUTOMATION_HISTORY_WINDOW",
        "AUTOMATION_INPUT_COST_PER_MTOK",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new("org-1");
        assert_eq!(config.default_max_turns, 5);
        assert_eq!(config.history_window, 10);
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_history_window_is_capped() {
        assert_eq!(EngineConfig::new("o").with_history_window(50).history_window, 10);
        assert_eq!(EngineConfig::new("o").with_history_window(0).history_window, 1);
    }

    #[test]
    fn test_pricing() {
        let pricing = Pricing::default();
        let cost = pricing.cost(&Usage::new(1_000_000, 1_000_000));
        assert!((cost - 0.70).abs() < 1e-9);
        assert_eq!(pricing.cost(&Usage::new(0, 0)), 0.0);
    }

    #[test]
    fn test_from_env_requires_org() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        assert!(matches!(
            EngineConfig::from_env(),
            Err(ConfigError::Missing("AUTOMATION_ORG_ID"))
        ));
    }

    #[test]
    fn test_from_env_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("AUTOMATION_ORG_ID", "wrapshop");
        env::set_var("AUTOMATION_DEFAULT_MAX_TURNS", "3");
        env::set_var("AUTOMATION_HISTORY_WINDOW", "25");
        env::set_var("AUTOMATION_INPUT_COST_PER_MTOK", "1.5");

        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.org_id, "wrapshop");
        assert_eq!(config.default_max_turns, 3);
        assert_eq!(config.history_window, 10);
        assert_eq!(config.pricing.input_per_mtok, 1.5);

        env::set_var("AUTOMATION_DEFAULT_MAX_TURNS", "lots");
        assert!(matches!(
            EngineConfig::from_env(),
            Err(ConfigError::Invalid { var: "AUTOMATION_DEFAULT_MAX_TURNS", .. })
        ));

        clear_env();
    }
}
