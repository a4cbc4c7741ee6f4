//! Decision engine that sequences one automation decision per trigger.

use std::sync::Arc;

use brain_core::fingerprint_request;
use database::{AutomatedTurn, Conversation, Customer, LogOutcome, NewAutomationLog};
use tracing::{debug, info, warn};

use crate::composer::{compose, latest_inbound, ResolvedConfig};
use crate::config::EngineConfig;
use crate::dispatch::Dispatcher;
use crate::error::EngineError;
use crate::generation::GenerationClient;
use crate::guard::{self, Verdict};
use crate::locks::ThreadLocks;
use crate::resolver::resolve_rule;
use crate::sender::MessageSender;
use crate::store::ConfigStore;
use crate::trigger::{Decision, EscalationReason, SkipReason, TriggerEvent};

/// Model identity recorded on escalation log rows.
const ESCALATED_MODEL: &str = "escalated";

/// `paused_by` value for threads held after a keyword escalation.
pub const KEYWORD_HOLD: &str = "escalation:keyword";

/// Decides, per trigger event, whether to skip, escalate, or send one
/// automated reply.
///
/// Invocations for the same conversation are serialized; the turn
/// increment is additionally applied as a conditional update in the store.
pub struct DecisionEngine {
    config: EngineConfig,
    store: Arc<dyn ConfigStore>,
    generation: GenerationClient,
    dispatcher: Dispatcher,
    locks: ThreadLocks,
}

impl DecisionEngine {
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn ConfigStore>,
        generation: GenerationClient,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        let dispatcher = Dispatcher::new(store.clone(), sender);
        Self {
            config,
            store,
            generation,
            dispatcher,
            locks: ThreadLocks::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generation(&self) -> &GenerationClient {
        &self.generation
    }

    /// Handle one trigger event to completion.
    pub async fn process(&self, trigger: &TriggerEvent) -> Result<Decision, EngineError> {
        let result = self.decide(trigger).await;

        match result {
            Ok(ref decision) => info!(
                conversation_id = %trigger.conversation_id,
                trigger_type = %trigger.trigger_type,
                "Automation decision: {:?}",
                decision
            ),
            Err(ref e) => warn!(
                conversation_id = %trigger.conversation_id,
                trigger_type = %trigger.trigger_type,
                code = e.code(),
                "Automation failed: {}",
                e
            ),
        }

        result
    }

    async fn decide(&self, trigger: &TriggerEvent) -> Result<Decision, EngineError> {
        trigger.validate()?;

        if !self.generation.is_configured() {
            return Err(EngineError::ProviderUnavailable);
        }

        let org_id = self.config.org_id.as_str();
        let Some(rule) = resolve_rule(self.store.as_ref(), org_id, &trigger.trigger_type).await?
        else {
            return Ok(Decision::Skipped(SkipReason::NoActiveRule));
        };

        let conversation = self.load_conversation(&trigger.conversation_id).await?;

        let _lock = self.locks.acquire(&conversation.id).await;

        let thread = self.store.get_override(&conversation.id).await?;
        let resolved =
            ResolvedConfig::merge(&rule, thread.as_ref(), self.config.default_max_turns);
        let history = self
            .store
            .recent_messages(&conversation.id, self.config.history_window)
            .await?;
        let trigger_message = trigger.message();

        match guard::check(
            &resolved,
            thread.as_ref(),
            latest_inbound(trigger_message, &history),
        ) {
            Verdict::Continue => {}
            Verdict::Skip(reason) => {
                let entry = self.log_entry(trigger, LogOutcome::Skipped).with_reason(reason.as_str());
                self.dispatcher.record_skip(&entry).await?;
                return Ok(Decision::Skipped(reason));
            }
            Verdict::Escalate(reason) => {
                self.escalate(trigger, &conversation, reason).await?;
                return Ok(Decision::Escalated(reason));
            }
        }

        let customer = self.load_customer(trigger, &conversation).await?;
        let request = compose(
            &resolved,
            customer.as_ref(),
            &history,
            trigger_message,
            self.config.max_tokens,
        );
        let prompt_hash = fingerprint_request(&request);
        debug!(conversation_id = %conversation.id, prompt_hash = %prompt_hash, "Composed prompt");

        let completion = self.generation.generate(request).await?;

        let delivery = self
            .dispatcher
            .deliver(phone_of(customer.as_ref()), &completion.text)
            .await;

        let mut log = self
            .log_entry(trigger, LogOutcome::Sent)
            .with_model(completion.model.as_str())
            .with_text(completion.text.as_str())
            .with_delivery_status(delivery.as_log_value());
        log.prompt_tokens = i64::from(completion.usage.prompt_tokens);
        log.completion_tokens = i64::from(completion.usage.completion_tokens);
        log.cost_usd = self.config.pricing.cost(&completion.usage);
        log.prompt_hash = Some(prompt_hash);

        let turn = AutomatedTurn {
            conversation_id: conversation.id.clone(),
            body: completion.text.clone(),
            expected_turns_used: thread.as_ref().map_or(0, |t| t.turns_used),
            log,
        };
        let turns_used = self.dispatcher.commit_reply(&turn).await?;

        Ok(Decision::Sent {
            text: completion.text,
            turns_used,
        })
    }

    async fn escalate(
        &self,
        trigger: &TriggerEvent,
        conversation: &Conversation,
        reason: EscalationReason,
    ) -> Result<(), EngineError> {
        let mut entry = self
            .log_entry(trigger, LogOutcome::Escalated)
            .with_reason(reason.as_str())
            .with_model(ESCALATED_MODEL);

        // A keyword hands the thread to a human until it is resumed.
        let hold_as = match reason {
            EscalationReason::Keyword => {
                let handoff = self.config.handoff_message.as_str();
                let customer = self.load_customer(trigger, conversation).await?;
                let delivery = self.dispatcher.deliver(phone_of(customer.as_ref()), handoff).await;
                entry = entry
                    .with_text(handoff)
                    .with_delivery_status(delivery.as_log_value());
                Some(KEYWORD_HOLD)
            }
            EscalationReason::TurnLimit => None,
        };

        self.dispatcher.escalate(&entry, hold_as).await
    }

    /// Take a thread out of automation on behalf of a human agent.
    pub async fn pause_thread(
        &self,
        conversation_id: &str,
        paused_by: &str,
    ) -> Result<(), EngineError> {
        if paused_by.trim().is_empty() {
            return Err(EngineError::InvalidTrigger("pausedBy is required".to_string()));
        }
        let conversation = self.load_conversation(conversation_id).await?;

        let _lock = self.locks.acquire(&conversation.id).await;
        self.store.pause_thread(&conversation.id, paused_by).await?;

        info!(conversation_id = %conversation.id, paused_by, "Thread paused");
        Ok(())
    }

    /// Re-enable automation on a thread, allowing `extra_turns` more
    /// automated replies. Defaults to one full budget: the thread's admin
    /// limit, else the limit of the rule that last acted on it, else the
    /// configured default. Returns the new turn limit.
    pub async fn resume_thread(
        &self,
        conversation_id: &str,
        extra_turns: Option<i64>,
    ) -> Result<i64, EngineError> {
        let conversation = self.load_conversation(conversation_id).await?;

        let _lock = self.locks.acquire(&conversation.id).await;
        let extra_turns = match extra_turns {
            Some(extra) => extra,
            None => self.turn_budget(&conversation.id).await?,
        };
        let max_turns = self.store.resume_thread(&conversation.id, extra_turns).await?;

        info!(conversation_id = %conversation.id, extra_turns, max_turns, "Thread resumed");
        Ok(max_turns)
    }

    /// Turns one budget allows, ignoring any earlier resume.
    async fn turn_budget(&self, conversation_id: &str) -> Result<i64, EngineError> {
        let thread = self.store.get_override(conversation_id).await?;
        if let Some(max_turns) = thread.and_then(|t| t.max_turns) {
            return Ok(max_turns);
        }

        let rule_limit = match self.store.last_trigger_type(conversation_id).await? {
            Some(trigger_type) => self
                .store
                .find_active_rule(&self.config.org_id, &trigger_type)
                .await?
                .and_then(|rule| rule.max_turns),
            None => None,
        };
        Ok(rule_limit.unwrap_or(self.config.default_max_turns))
    }

    async fn load_conversation(&self, id: &str) -> Result<Conversation, EngineError> {
        match self.store.get_conversation(id).await? {
            Some(conversation) if conversation.org_id == self.config.org_id => Ok(conversation),
            _ => Err(EngineError::ConversationNotFound(id.to_string())),
        }
    }

    async fn load_customer(
        &self,
        trigger: &TriggerEvent,
        conversation: &Conversation,
    ) -> Result<Option<Customer>, EngineError> {
        let Some(customer_id) = trigger
            .customer_id
            .as_deref()
            .or(conversation.customer_id.as_deref())
        else {
            return Ok(None);
        };
        Ok(self.store.get_customer(customer_id).await?)
    }

    fn log_entry(&self, trigger: &TriggerEvent, outcome: LogOutcome) -> NewAutomationLog {
        NewAutomationLog::new(
            self.config.org_id.as_str(),
            trigger.conversation_id.as_str(),
            trigger.trigger_type.as_str(),
            outcome,
        )
    }
}

fn phone_of(customer: Option<&Customer>) -> Option<&str> {
    customer.and_then(|c| c.phone.as_deref())
}
