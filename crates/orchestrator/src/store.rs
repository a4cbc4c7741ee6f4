//! Config store seam used by the engine.

use async_trait::async_trait;
use database::{
    automation_log, automation_rule, conversation, customer, message, thread_override, turn,
    AutomatedTurn, AutomationRule, Conversation, ConversationMessage, Customer, Database,
    DatabaseError, NewAutomationLog, ThreadOverride,
};

/// Reads and writes the engine needs from the relational store.
///
/// Implemented for [`Database`]; other backends can be plugged in behind
/// this trait.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The enabled rule for `(org_id, trigger_type)`.
    async fn find_active_rule(
        &self,
        org_id: &str,
        trigger_type: &str,
    ) -> Result<Option<AutomationRule>, DatabaseError>;

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, DatabaseError>;

    async fn get_customer(&self, id: &str) -> Result<Option<Customer>, DatabaseError>;

    async fn get_override(
        &self,
        conversation_id: &str,
    ) -> Result<Option<ThreadOverride>, DatabaseError>;

    /// The newest `limit` messages, oldest first.
    async fn recent_messages(
        &self,
        conversation_id: &str,
        limit: i64,
    ) -> Result<Vec<ConversationMessage>, DatabaseError>;

    async fn append_log(&self, entry: &NewAutomationLog) -> Result<(), DatabaseError>;

    /// Trigger type of the newest log row for the conversation.
    async fn last_trigger_type(&self, conversation_id: &str)
        -> Result<Option<String>, DatabaseError>;

    /// Reopen the conversation and flag it for human attention.
    async fn reopen_conversation(&self, id: &str) -> Result<(), DatabaseError>;

    /// Atomically persist an automated reply. Returns the new turn count.
    async fn record_turn(&self, turn: &AutomatedTurn) -> Result<i64, DatabaseError>;

    async fn pause_thread(&self, conversation_id: &str, paused_by: &str)
        -> Result<(), DatabaseError>;

    /// Clear the pause and attention flag, and cap the thread at
    /// `turns_used + extra_turns`.
    async fn resume_thread(
        &self,
        conversation_id: &str,
        extra_turns: i64,
    ) -> Result<i64, DatabaseError>;
}

#[async_trait]
impl ConfigStore for Database {
    async fn find_active_rule(
        &self,
        org_id: &str,
        trigger_type: &str,
    ) -> Result<Option<AutomationRule>, DatabaseError> {
        automation_rule::find_active_rule(self.pool(), org_id, trigger_type).await
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, DatabaseError> {
        conversation::get_conversation(self.pool(), id).await
    }

    async fn get_customer(&self, id: &str) -> Result<Option<Customer>, DatabaseError> {
        customer::get_customer(self.pool(), id).await
    }

    async fn get_override(
        &self,
        conversation_id: &str,
    ) -> Result<Option<ThreadOverride>, DatabaseError> {
        thread_override::get_override(self.pool(), conversation_id).await
    }

    async fn recent_messages(
        &self,
        conversation_id: &str,
        limit: i64,
    ) -> Result<Vec<ConversationMessage>, DatabaseError> {
        message::list_recent(self.pool(), conversation_id, limit).await
    }

    async fn append_log(&self, entry: &NewAutomationLog) -> Result<(), DatabaseError> {
        automation_log::insert_log(self.pool(), entry).await?;
        Ok(())
    }

    async fn last_trigger_type(
        &self,
        conversation_id: &str,
    ) -> Result<Option<String>, DatabaseError> {
        automation_log::latest_trigger_type(self.pool(), conversation_id).await
    }

    async fn reopen_conversation(&self, id: &str) -> Result<(), DatabaseError> {
        conversation::reopen_conversation(self.pool(), id).await
    }

    async fn record_turn(&self, turn: &AutomatedTurn) -> Result<i64, DatabaseError> {
        turn::record_automated_turn(self.pool(), turn).await
    }

    async fn pause_thread(
        &self,
        conversation_id: &str,
        paused_by: &str,
    ) -> Result<(), DatabaseError> {
        thread_override::pause(self.pool(), conversation_id, paused_by).await
    }

    async fn resume_thread(
        &self,
        conversation_id: &str,
        extra_turns: i64,
    ) -> Result<i64, DatabaseError> {
        thread_override::resume(self.pool(), conversation_id, extra_turns).await
    }
}
