//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Direction of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    /// Sent by the customer.
    Inbound,
    /// Sent by the business (a person or the automation).
    Outbound,
}

/// Terminal outcome recorded in the automation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogOutcome {
    Escalated,
    Sent,
    Skipped,
}

impl LogOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOutcome::Escalated => "escalated",
            LogOutcome::Sent => "sent",
            LogOutcome::Skipped => "skipped",
        }
    }
}

/// A customer record. Read-only to the automation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: String,
    pub org_id: String,
    /// Display name
    pub name: String,
    /// Phone number as entered by staff; may need normalizing.
    pub phone: Option<String>,
    /// Business name, for commercial customers.
    pub business: Option<String>,
}

/// A customer conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    pub id: String,
    pub org_id: String,
    pub customer_id: Option<String>,
    /// "open" or "closed".
    pub status: String,
    /// Set when the thread has been handed to a human.
    pub needs_attention: bool,
    pub updated_at: String,
}

/// A message in a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ConversationMessage {
    pub id: i64,
    pub conversation_id: String,
    pub direction: MessageDirection,
    pub body: String,
    /// Whether the automation engine wrote this message.
    pub automated: bool,
    pub created_at: String,
}

/// Organization-level automation rule for one trigger type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AutomationRule {
    pub id: i64,
    pub org_id: String,
    pub trigger_type: String,
    pub enabled: bool,
    pub ai_enabled: bool,
    /// Default bound on automated turns per thread.
    pub max_turns: Option<i64>,
    pub persona: Option<String>,
    pub goal: Option<String>,
    /// Free-text business facts for the prompt.
    pub context: Option<String>,
    /// JSON array of case-insensitive substrings.
    pub escalation_keywords: Option<String>,
    pub updated_at: String,
}

impl AutomationRule {
    /// Decoded escalation keywords, if the rule sets any.
    pub fn keywords(&self) -> Option<Vec<String>> {
        decode_keywords(self.escalation_keywords.as_deref(), "automation_rules", &self.id.to_string())
    }
}

/// Per-conversation automation state and overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ThreadOverride {
    pub conversation_id: String,
    /// Set when a human has taken over the thread.
    pub paused_by: Option<String>,
    /// Admin-set per-thread budget.
    pub max_turns: Option<i64>,
    /// Cap set by the last resume, `turns_used + extra` at that time.
    pub resume_limit: Option<i64>,
    /// Automated replies sent so far. Never decreases.
    pub turns_used: i64,
    pub ai_enabled: Option<bool>,
    pub persona: Option<String>,
    pub goal: Option<String>,
    /// JSON array of case-insensitive substrings.
    pub escalation_keywords: Option<String>,
    pub updated_at: String,
}

impl ThreadOverride {
    /// The thread's own turn cap: the resume cap when one is set, else the
    /// admin budget.
    pub fn turn_limit(&self) -> Option<i64> {
        self.resume_limit.or(self.max_turns)
    }

    /// Decoded escalation keywords, if the override sets any.
    pub fn keywords(&self) -> Option<Vec<String>> {
        decode_keywords(
            self.escalation_keywords.as_deref(),
            "thread_overrides",
            &self.conversation_id,
        )
    }
}

/// One audit record per engine invocation that reached a terminal decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AutomationLogEntry {
    pub id: i64,
    pub org_id: String,
    pub conversation_id: String,
    pub trigger_type: String,
    pub outcome: LogOutcome,
    pub reason: Option<String>,
    /// Model identity, or "escalated" for hand-offs.
    pub model: Option<String>,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub cost_usd: f64,
    pub prompt_hash: Option<String>,
    pub delivery_status: Option<String>,
    pub generated_text: Option<String>,
    pub created_at: String,
}

/// Encode a keyword list for storage.
pub fn encode_keywords(keywords: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(keywords).unwrap_or_else(|_| "[]".to_string())
}

fn decode_keywords(raw: Option<&str>, table: &str, id: &str) -> Option<Vec<String>> {
    let raw = raw?;
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(keywords) => Some(keywords),
        Err(e) => {
            tracing::warn!(
                "Ignoring unreadable escalation keywords in {} {}: {}",
                table,
                id,
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_encoding() {
        let encoded = encode_keywords(&["refund".to_string(), "cancel".to_string()]);
        assert_eq!(encoded, r#"["refund","cancel"]"#);
        assert_eq!(
            decode_keywords(Some(&encoded), "t", "1"),
            Some(vec!["refund".to_string(), "cancel".to_string()])
        );
    }

    #[test]
    fn test_unreadable_keywords_are_ignored() {
        assert_eq!(decode_keywords(Some("refund,cancel"), "t", "1"), None);
        assert_eq!(decode_keywords(None, "t", "1"), None);
        assert_eq!(decode_keywords(Some("[]"), "t", "1"), Some(vec![]));
    }
}
