//! Organization-level automation rules.

use sqlx::SqlitePool;

use crate::models::{encode_keywords, AutomationRule};
use crate::validation::{normalize_keywords, validate_context, validate_key, validate_max_turns};
use crate::Result;

/// Fields an admin sets on a rule.
#[derive(Debug, Clone, Default)]
pub struct RuleSettings {
    pub enabled: bool,
    pub ai_enabled: bool,
    pub max_turns: Option<i64>,
    pub persona: Option<String>,
    pub goal: Option<String>,
    pub context: Option<String>,
    pub escalation_keywords: Option<Vec<String>>,
}

/// Create or replace the rule for an organization and trigger type.
///
/// Returns the rule ID.
pub async fn upsert_rule(
    pool: &SqlitePool,
    org_id: &str,
    trigger_type: &str,
    settings: &RuleSettings,
) -> Result<i64> {
    validate_key("trigger_type", trigger_type)?;
    if let Some(max_turns) = settings.max_turns {
        validate_max_turns(max_turns)?;
    }
    if let Some(ref persona) = settings.persona {
        validate_key("persona", persona)?;
    }
    if let Some(ref goal) = settings.goal {
        validate_key("goal", goal)?;
    }
    if let Some(ref context) = settings.context {
        validate_context(context)?;
    }
    let keywords = match settings.escalation_keywords {
        Some(ref keywords) => Some(encode_keywords(&normalize_keywords(keywords)?)),
        None => None,
    };

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO automation_rules
            (org_id, trigger_type, enabled, ai_enabled, max_turns, persona, goal, context, escalation_keywords)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(org_id, trigger_type) DO UPDATE SET
            enabled = excluded.enabled,
            ai_enabled = excluded.ai_enabled,
            max_turns = excluded.max_turns,
            persona = excluded.persona,
            goal = excluded.goal,
            context = excluded.context,
            escalation_keywords = excluded.escalation_keywords,
            updated_at = datetime('now')
        RETURNING id
        "#,
    )
    .bind(org_id)
    .bind(trigger_type.trim())
    .bind(settings.enabled)
    .bind(settings.ai_enabled)
    .bind(settings.max_turns)
    .bind(&settings.persona)
    .bind(&settings.goal)
    .bind(&settings.context)
    .bind(keywords)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Find the enabled rule for an organization and trigger type.
pub async fn find_active_rule(
    pool: &SqlitePool,
    org_id: &str,
    trigger_type: &str,
) -> Result<Option<AutomationRule>> {
    let record = sqlx::query_as::<_, AutomationRule>(
        r#"
        SELECT id, org_id, trigger_type, enabled, ai_enabled, max_turns, persona, goal,
               context, escalation_keywords, updated_at
        FROM automation_rules
        WHERE org_id = ? AND trigger_type = ? AND enabled = 1
        "#,
    )
    .bind(org_id)
    .bind(trigger_type)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Enable or disable a rule.
pub async fn set_enabled(
    pool: &SqlitePool,
    org_id: &str,
    trigger_type: &str,
    enabled: bool,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE automation_rules
        SET enabled = ?, updated_at = datetime('now')
        WHERE org_id = ? AND trigger_type = ?
        "#,
    )
    .bind(enabled)
    .bind(org_id)
    .bind(trigger_type)
    .execute(pool)
    .await?;

    Ok(())
}
