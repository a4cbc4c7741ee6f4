//! Escalation guard: decides whether a thread may receive another
//! automated reply before anything is generated.

use database::ThreadOverride;

use crate::composer::ResolvedConfig;
use crate::trigger::{EscalationReason, SkipReason};

/// Result of the guard checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Safe to generate a reply.
    Continue,
    Skip(SkipReason),
    Escalate(EscalationReason),
}

/// Run the guard checks in order, stopping at the first that fires:
/// pause, thread AI switch, turn limit, escalation keyword.
pub fn check(
    config: &ResolvedConfig,
    thread: Option<&ThreadOverride>,
    latest_inbound: Option<&str>,
) -> Verdict {
    if thread.is_some_and(|t| t.paused_by.is_some()) {
        return Verdict::Skip(SkipReason::Paused);
    }

    if !config.ai_enabled {
        return Verdict::Skip(SkipReason::AiDisabled);
    }

    let turns_used = thread.map_or(0, |t| t.turns_used);
    if turns_used >= config.max_turns {
        return Verdict::Escalate(EscalationReason::TurnLimit);
    }

    if let Some(message) = latest_inbound {
        if matched_keyword(&config.escalation_keywords, message).is_some() {
            return Verdict::Escalate(EscalationReason::Keyword);
        }
    }

    Verdict::Continue
}

/// First keyword contained in `message`, ignoring case.
pub fn matched_keyword<'a>(keywords: &'a [String], message: &str) -> Option<&'a str> {
    let message = message.to_lowercase();
    keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .find(|k| message.contains(&k.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{Goal, Persona};

    fn config(max_turns: i64, keywords: &[&str]) -> ResolvedConfig {
        ResolvedConfig {
            persona: Persona::Friendly,
            goal: Goal::None,
            context: None,
            max_turns,
            escalation_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ai_enabled: true,
        }
    }

    fn thread(turns_used: i64, paused_by: Option<&str>) -> ThreadOverride {
        ThreadOverride {
            conversation_id: "conv-1".to_string(),
            paused_by: paused_by.map(str::to_string),
            max_turns: None,
            resume_limit: None,
            turns_used,
            ai_enabled: None,
            persona: None,
            goal: None,
            escalation_keywords: None,
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let keywords = vec!["refund".to_string()];
        assert_eq!(matched_keyword(&keywords, "I need a REFUND now"), Some("refund"));
        assert_eq!(matched_keyword(&keywords, "refunds?"), Some("refund"));
        assert_eq!(matched_keyword(&keywords, "what colors do you have"), None);
    }

    #[test]
    fn test_continue_without_thread() {
        assert_eq!(check(&config(2, &["cancel"]), None, Some("Hi")), Verdict::Continue);
        assert_eq!(check(&config(2, &["cancel"]), None, None), Verdict::Continue);
    }

    #[test]
    fn test_pause_wins_over_everything() {
        let t = thread(10, Some("agent-7"));
        assert_eq!(
            check(&config(2, &["cancel"]), Some(&t), Some("cancel")),
            Verdict::Skip(SkipReason::Paused)
        );
    }

    #[test]
    fn test_ai_disabled_on_thread() {
        let mut cfg = config(2, &[]);
        cfg.ai_enabled = false;
        assert_eq!(
            check(&cfg, Some(&thread(0, None)), Some("hi")),
            Verdict::Skip(SkipReason::AiDisabled)
        );
    }

    #[test]
    fn test_turn_limit_before_keyword() {
        let cfg = config(2, &["cancel"]);
        assert_eq!(
            check(&cfg, Some(&thread(2, None)), Some("cancel it")),
            Verdict::Escalate(EscalationReason::TurnLimit)
        );
        assert_eq!(
            check(&cfg, Some(&thread(1, None)), Some("Actually cancel my order")),
            Verdict::Escalate(EscalationReason::Keyword)
        );
        assert_eq!(check(&cfg, Some(&thread(1, None)), Some("ok")), Verdict::Continue);
    }

    #[test]
    fn test_zero_limit_escalates_immediately() {
        assert_eq!(
            check(&config(0, &[]), None, Some("hi")),
            Verdict::Escalate(EscalationReason::TurnLimit)
        );
    }
}
