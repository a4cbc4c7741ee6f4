//! Trigger events and engine decisions.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

const MAX_ID_LENGTH: usize = 128;

/// Optional payload carried by a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerContext {
    /// The inbound message that caused the trigger.
    #[serde(default)]
    pub trigger_message: Option<String>,
}

/// An inbound signal asking the engine for one automation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub trigger_type: String,
    pub conversation_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub context: Option<TriggerContext>,
}

impl TriggerEvent {
    pub fn new(trigger_type: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            trigger_type: trigger_type.into(),
            conversation_id: conversation_id.into(),
            customer_id: None,
            context: None,
        }
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.context = Some(TriggerContext {
            trigger_message: Some(message.into()),
        });
        self
    }

    /// The trigger message, if present and not blank.
    pub fn message(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.trigger_message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    /// Reject payloads the engine cannot act on.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_id("triggerType", &self.trigger_type)?;
        check_id("conversationId", &self.conversation_id)?;
        if let Some(ref customer_id) = self.customer_id {
            check_id("customerId", customer_id)?;
        }
        Ok(())
    }
}

fn check_id(field: &str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidTrigger(format!("{} is required", field)));
    }
    if value.len() > MAX_ID_LENGTH {
        return Err(EngineError::InvalidTrigger(format!(
            "{} exceeds {} characters",
            field, MAX_ID_LENGTH
        )));
    }
    Ok(())
}

/// Why automation did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No enabled rule, or the rule has AI turned off.
    NoActiveRule,
    /// A human has taken over the thread.
    Paused,
    /// The thread override turns AI off.
    AiDisabled,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoActiveRule => "no active rule",
            SkipReason::Paused => "paused",
            SkipReason::AiDisabled => "ai_disabled",
        }
    }
}

/// Why a thread was handed to a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationReason {
    TurnLimit,
    Keyword,
}

impl EscalationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationReason::TurnLimit => "turn_limit",
            EscalationReason::Keyword => "keyword",
        }
    }
}

/// Terminal result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Skipped(SkipReason),
    Escalated(EscalationReason),
    Sent { text: String, turns_used: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_payload() {
        let json = r#"{
            "triggerType": "new_message",
            "conversationId": "conv-1",
            "customerId": "cust-1",
            "context": { "triggerMessage": "Hi, I want a wrap quote" }
        }"#;
        let trigger: TriggerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(trigger.trigger_type, "new_message");
        assert_eq!(trigger.customer_id.as_deref(), Some("cust-1"));
        assert_eq!(trigger.message(), Some("Hi, I want a wrap quote"));
        assert!(trigger.validate().is_ok());
    }

    #[test]
    fn test_minimal_payload() {
        let trigger: TriggerEvent =
            serde_json::from_str(r#"{"triggerType":"new_message","conversationId":"c"}"#).unwrap();
        assert!(trigger.customer_id.is_none());
        assert!(trigger.message().is_none());
    }

    #[test]
    fn test_blank_message_is_absent() {
        let trigger = TriggerEvent::new("new_message", "c").with_message("   ");
        assert!(trigger.message().is_none());
    }

    #[test]
    fn test_validate_rejects_blank_ids() {
        let err = TriggerEvent::new(" ", "conv-1").validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidTrigger(_)));

        let err = TriggerEvent::new("new_message", "").validate().unwrap_err();
        assert_eq!(err.status_code(), 400);

        let long = "x".repeat(200);
        assert!(TriggerEvent::new("new_message", long).validate().is_err());
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(SkipReason::NoActiveRule.as_str(), "no active rule");
        assert_eq!(EscalationReason::TurnLimit.as_str(), "turn_limit");
        assert_eq!(EscalationReason::Keyword.as_str(), "keyword");
    }
}
