//! Dispatch and persistence of engine outcomes.

use std::sync::Arc;

use database::{AutomatedTurn, NewAutomationLog};
use tracing::{error, info, warn};

use crate::error::EngineError;
use crate::sender::{Delivery, MessageSender};
use crate::store::ConfigStore;

/// Transport result recorded on the audit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    /// No gateway configured.
    LoggedOnly,
    /// The gateway rejected or never received the message.
    Failed(String),
    /// The customer has no phone number on file.
    NoAddress,
}

impl DeliveryStatus {
    /// Value stored in `automation_logs.delivery_status`.
    pub fn as_log_value(&self) -> String {
        match self {
            DeliveryStatus::Delivered => "delivered".to_string(),
            DeliveryStatus::LoggedOnly => "logged_only".to_string(),
            DeliveryStatus::Failed(reason) => format!("failed: {}", reason),
            DeliveryStatus::NoAddress => "no_address".to_string(),
        }
    }
}

/// Sends approved text and writes outcomes to the store.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ConfigStore>,
    sender: Arc<dyn MessageSender>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ConfigStore>, sender: Arc<dyn MessageSender>) -> Self {
        Self { store, sender }
    }

    /// Best-effort delivery. Failures are reported, never returned.
    pub async fn deliver(&self, address: Option<&str>, body: &str) -> DeliveryStatus {
        let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
            info!("No delivery address on file, message not sent");
            return DeliveryStatus::NoAddress;
        };

        match self.sender.send_text(address, body).await {
            Ok(Delivery::Sent { id }) => {
                info!(message_id = %id, "Message delivered to gateway");
                DeliveryStatus::Delivered
            }
            Ok(Delivery::LoggedOnly) => DeliveryStatus::LoggedOnly,
            Err(e) => {
                warn!("Message delivery failed: {}", e);
                DeliveryStatus::Failed(e.to_string())
            }
        }
    }

    /// Persist an automated reply and its turn increment atomically.
    pub async fn commit_reply(&self, turn: &AutomatedTurn) -> Result<i64, EngineError> {
        self.store.record_turn(turn).await.map_err(|e| {
            let e = EngineError::from(e);
            if matches!(e, EngineError::TurnConflict(_)) {
                error!(
                    conversation_id = %turn.conversation_id,
                    expected_turns_used = turn.expected_turns_used,
                    "Turn count changed underneath this invocation, reply not recorded"
                );
            }
            e
        })
    }

    /// Reopen the conversation for a human and record the escalation.
    ///
    /// With `hold_as`, the thread is also paused under that name so later
    /// triggers skip it until it is resumed.
    pub async fn escalate(
        &self,
        entry: &NewAutomationLog,
        hold_as: Option<&str>,
    ) -> Result<(), EngineError> {
        self.store.reopen_conversation(&entry.conversation_id).await?;
        if let Some(holder) = hold_as {
            self.store.pause_thread(&entry.conversation_id, holder).await?;
        }
        self.store.append_log(entry).await?;
        Ok(())
    }

    /// Record a skipped invocation.
    pub async fn record_skip(&self, entry: &NewAutomationLog) -> Result<(), EngineError> {
        self.store.append_log(entry).await?;
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_values() {
        assert_eq!(DeliveryStatus::Delivered.as_log_value(), "delivered");
        assert_eq!(DeliveryStatus::LoggedOnly.as_log_value(), "logged_only");
        assert_eq!(DeliveryStatus::NoAddress.as_log_value(), "no_address");
        assert_eq!(
            DeliveryStatus::Failed("API error 503: down".into()).as_log_value(),
            "failed: API error 503: down"
        );
    }
}
