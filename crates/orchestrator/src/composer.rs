//! Configuration merging and prompt composition.

use brain_core::{ChatTurn, CompletionRequest};
use database::{AutomationRule, ConversationMessage, Customer, MessageDirection, ThreadOverride};

use crate::config::MAX_HISTORY_WINDOW;
use crate::persona::{Goal, Persona};

/// Keywords that hand a thread to a human when nothing else is configured.
pub const BUILTIN_ESCALATION_KEYWORDS: [&str; 5] =
    ["angry", "refund", "cancel", "lawsuit", "manager"];

/// Customer turn used when a thread has no history and no trigger message.
pub const NEW_CONVERSATION_TURN: &str = "(new conversation, no message yet)";

/// Rule and thread override collapsed into one value, thread winning.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub persona: Persona,
    pub goal: Goal,
    pub context: Option<String>,
    pub max_turns: i64,
    /// Lowercased, non-blank. Empty disables keyword escalation.
    pub escalation_keywords: Vec<String>,
    pub ai_enabled: bool,
}

impl ResolvedConfig {
    pub fn merge(
        rule: &AutomationRule,
        thread: Option<&ThreadOverride>,
        default_max_turns: i64,
    ) -> Self {
        let persona_key = thread
            .and_then(|t| t.persona.as_deref())
            .or(rule.persona.as_deref());
        let goal_key = thread.and_then(|t| t.goal.as_deref()).or(rule.goal.as_deref());

        let max_turns = thread
            .and_then(|t| t.turn_limit())
            .or(rule.max_turns)
            .unwrap_or(default_max_turns);

        let keywords = thread
            .and_then(|t| t.keywords())
            .or_else(|| rule.keywords())
            .unwrap_or_else(|| {
                BUILTIN_ESCALATION_KEYWORDS
                    .iter()
                    .map(|k| k.to_string())
                    .collect()
            });

        Self {
            persona: Persona::resolve(persona_key),
            goal: Goal::resolve(goal_key),
            context: rule
                .context
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            max_turns,
            escalation_keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            ai_enabled: thread.and_then(|t| t.ai_enabled).unwrap_or(rule.ai_enabled),
        }
    }
}

/// The message the keyword check runs against: the trigger message when
/// present, else the newest inbound message in `history`.
pub fn latest_inbound<'a>(
    trigger_message: Option<&'a str>,
    history: &'a [ConversationMessage],
) -> Option<&'a str> {
    trigger_message.or_else(|| {
        history
            .iter()
            .rev()
            .find(|m| m.direction == MessageDirection::Inbound)
            .map(|m| m.body.as_str())
    })
}

/// Build the provider request for one reply.
pub fn compose(
    config: &ResolvedConfig,
    customer: Option<&Customer>,
    history: &[ConversationMessage],
    trigger_message: Option<&str>,
    max_tokens: u32,
) -> CompletionRequest {
    CompletionRequest::new(
        system_prompt(config, customer),
        transcript(history, trigger_message),
        max_tokens,
    )
}

fn system_prompt(config: &ResolvedConfig, customer: Option<&Customer>) -> String {
    let mut prompt = String::from(
        "You are an automated assistant replying by text message on behalf of a small business.\n\n",
    );

    prompt.push_str(&format!("Tone: {}\n", config.persona.description()));
    prompt.push_str(&format!("Objective: {}\n\n", config.goal.objective()));

    prompt.push_str("Business information:\n");
    match config.context {
        Some(ref context) => prompt.push_str(context),
        None => prompt.push_str("(none provided)"),
    }
    prompt.push_str("\n\n");

    if let Some(customer) = customer {
        prompt.push_str("Customer:\n");
        prompt.push_str(&format!("- Name: {}\n", customer.name));
        if let Some(business) = customer.business.as_deref().filter(|b| !b.trim().is_empty()) {
            prompt.push_str(&format!("- Business: {}\n", business));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Rules:\n\
         - Never claim to be a human. If asked, say you are an automated assistant.\n\
         - Never quote an exact price. Offer to have the team follow up with a quote.\n\
         - If the customer is angry or mentions legal action, stay calm, apologize, and say a team member will reach out.\n\
         - Never send two automated messages in a row without a reply from the customer.\n\
         - Keep replies short enough for a text message.",
    );

    prompt
}

fn transcript(history: &[ConversationMessage], trigger_message: Option<&str>) -> Vec<ChatTurn> {
    let mut turns: Vec<ChatTurn> = history
        .iter()
        .map(|m| match m.direction {
            MessageDirection::Inbound => ChatTurn::customer(m.body.as_str()),
            MessageDirection::Outbound => ChatTurn::assistant(m.body.as_str()),
        })
        .collect();

    match trigger_message {
        Some(text) if !already_stored(history, text) => turns.push(ChatTurn::customer(text)),
        None if turns.is_empty() => turns.push(ChatTurn::customer(NEW_CONVERSATION_TURN)),
        _ => {}
    }

    let window = MAX_HISTORY_WINDOW as usize;
    if turns.len() > window {
        turns.drain(..turns.len() - window);
    }
    turns
}

/// Whether the trigger message is already the newest stored message.
fn already_stored(history: &[ConversationMessage], text: &str) -> bool {
    history.last().is_some_and(|m| {
        m.direction == MessageDirection::Inbound && m.body.trim() == text.trim()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::ChatRole;

    fn rule() -> AutomationRule {
        AutomationRule {
            id: 1,
            org_id: "org-1".to_string(),
            trigger_type: "new_message".to_string(),
            enabled: true,
            ai_enabled: true,
            max_turns: Some(3),
            persona: Some("professional".to_string()),
            goal: Some("collect_quote_info".to_string()),
            context: Some("Full wraps start at 3 days of shop time.".to_string()),
            escalation_keywords: Some(r#"["cancel"]"#.to_string()),
            updated_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    fn thread() -> ThreadOverride {
        ThreadOverride {
            conversation_id: "conv-1".to_string(),
            paused_by: None,
            max_turns: None,
            resume_limit: None,
            turns_used: 0,
            ai_enabled: None,
            persona: None,
            goal: None,
            escalation_keywords: None,
            updated_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    fn msg(id: i64, direction: MessageDirection, body: &str) -> ConversationMessage {
        ConversationMessage {
            id,
            conversation_id: "conv-1".to_string(),
            direction,
            body: body.to_string(),
            automated: false,
            created_at: format!("2026-01-01 00:00:{:02}", id),
        }
    }

    #[test]
    fn test_merge_rule_only() {
        let resolved = ResolvedConfig::merge(&rule(), None, 5);
        assert_eq!(resolved.persona, Persona::Professional);
        assert_eq!(resolved.goal, Goal::CollectQuoteInfo);
        assert_eq!(resolved.max_turns, 3);
        assert_eq!(resolved.escalation_keywords, vec!["cancel".to_string()]);
        assert!(resolved.ai_enabled);
    }

    #[test]
    fn test_override_wins() {
        let thread = ThreadOverride {
            max_turns: Some(1),
            persona: Some("casual".to_string()),
            ai_enabled: Some(false),
            escalation_keywords: Some(r#"["Manager", "  "]"#.to_string()),
            ..thread()
        };
        let resolved = ResolvedConfig::merge(&rule(), Some(&thread), 5);
        assert_eq!(resolved.persona, Persona::Casual);
        assert_eq!(resolved.goal, Goal::CollectQuoteInfo);
        assert_eq!(resolved.max_turns, 1);
        assert_eq!(resolved.escalation_keywords, vec!["manager".to_string()]);
        assert!(!resolved.ai_enabled);
    }

    #[test]
    fn test_defaults_apply() {
        let bare = AutomationRule {
            max_turns: None,
            persona: Some("pirate".to_string()),
            goal: None,
            escalation_keywords: None,
            ..rule()
        };
        let resolved = ResolvedConfig::merge(&bare, Some(&thread()), 5);
        assert_eq!(resolved.max_turns, 5);
        assert_eq!(resolved.persona, Persona::Friendly);
        assert_eq!(resolved.goal, Goal::None);
        assert_eq!(resolved.escalation_keywords.len(), 5);
        assert!(resolved.escalation_keywords.contains(&"refund".to_string()));
    }

    #[test]
    fn test_empty_keyword_list_disables() {
        let thread = ThreadOverride {
            escalation_keywords: Some("[]".to_string()),
            ..thread()
        };
        let resolved = ResolvedConfig::merge(&rule(), Some(&thread), 5);
        assert!(resolved.escalation_keywords.is_empty());
    }

    #[test]
    fn test_latest_inbound() {
        let history = vec![
            msg(1, MessageDirection::Inbound, "first"),
            msg(2, MessageDirection::Inbound, "second"),
            msg(3, MessageDirection::Outbound, "reply"),
        ];
        assert_eq!(latest_inbound(None, &history), Some("second"));
        assert_eq!(latest_inbound(Some("trigger"), &history), Some("trigger"));
        assert_eq!(latest_inbound(None, &[]), None);
    }

    #[test]
    fn test_transcript_roles() {
        let history = vec![
            msg(1, MessageDirection::Inbound, "Need a quote"),
            msg(2, MessageDirection::Outbound, "Sure, what vehicle?"),
        ];
        let resolved = ResolvedConfig::merge(&rule(), None, 5);
        let request = compose(&resolved, None, &history, None, 300);

        assert_eq!(request.transcript.len(), 2);
        assert_eq!(request.transcript[0].role, ChatRole::Customer);
        assert_eq!(request.transcript[1].role, ChatRole::Assistant);
        assert_eq!(request.max_tokens, 300);
    }

    #[test]
    fn test_synthetic_first_turn() {
        let resolved = ResolvedConfig::merge(&rule(), None, 5);

        let request = compose(&resolved, None, &[], Some("Hi there"), 300);
        assert_eq!(request.transcript, vec![ChatTurn::customer("Hi there")]);

        let request = compose(&resolved, None, &[], None, 300);
        assert_eq!(request.transcript, vec![ChatTurn::customer(NEW_CONVERSATION_TURN)]);
    }

    #[test]
    fn test_unstored_trigger_message_ends_the_transcript() {
        let history = vec![
            msg(1, MessageDirection::Inbound, "hi"),
            msg(2, MessageDirection::Outbound, "Hello! How can I help?"),
        ];
        let resolved = ResolvedConfig::merge(&rule(), None, 5);
        let request = compose(&resolved, None, &history, Some("Do you wrap boats?"), 300);

        assert_eq!(request.transcript.len(), 3);
        assert_eq!(
            request.transcript.last(),
            Some(&ChatTurn::customer("Do you wrap boats?"))
        );
    }

    #[test]
    fn test_stored_trigger_message_is_not_repeated() {
        let history = vec![
            msg(1, MessageDirection::Outbound, "Hello! How can I help?"),
            msg(2, MessageDirection::Inbound, "Do you wrap boats?"),
        ];
        let resolved = ResolvedConfig::merge(&rule(), None, 5);
        let request = compose(&resolved, None, &history, Some("Do you wrap boats?"), 300);

        assert_eq!(request.transcript.len(), 2);
        assert_eq!(request.transcript[1].role, ChatRole::Customer);
    }

    #[test]
    fn test_appended_trigger_keeps_the_window() {
        let history: Vec<_> = (0..10)
            .map(|i| {
                let direction = if i % 2 == 0 {
                    MessageDirection::Inbound
                } else {
                    MessageDirection::Outbound
                };
                msg(i, direction, &format!("m{}", i))
            })
            .collect();
        let resolved = ResolvedConfig::merge(&rule(), None, 5);
        let request = compose(&resolved, None, &history, Some("latest"), 300);

        assert_eq!(request.transcript.len(), 10);
        assert_eq!(request.transcript[0].content, "m1");
        assert_eq!(request.transcript[9], ChatTurn::customer("latest"));
    }

    #[test]
    fn test_resume_cap_wins_over_admin_budget() {
        let thread = ThreadOverride {
            max_turns: Some(2),
            resume_limit: Some(6),
            ..thread()
        };
        let resolved = ResolvedConfig::merge(&rule(), Some(&thread), 5);
        assert_eq!(resolved.max_turns, 6);
    }

    #[test]
    fn test_system_prompt_contents() {
        let customer = Customer {
            id: "cust-1".to_string(),
            org_id: "org-1".to_string(),
            name: "Dana".to_string(),
            phone: None,
            business: Some("Dana's Bakery".to_string()),
        };
        let resolved = ResolvedConfig::merge(&rule(), None, 5);
        let request = compose(&resolved, Some(&customer), &[], None, 300);
        let prompt = &request.system_prompt;

        assert!(prompt.contains(Persona::Professional.description()));
        assert!(prompt.contains(Goal::CollectQuoteInfo.objective()));
        assert!(prompt.contains("Full wraps start at 3 days"));
        assert!(prompt.contains("- Name: Dana"));
        assert!(prompt.contains("- Business: Dana's Bakery"));
        assert!(prompt.contains("Never claim to be a human"));
        assert!(prompt.contains("Never quote an exact price"));
    }
}
