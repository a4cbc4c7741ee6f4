//! Per-conversation automation overrides and turn state.

use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::{encode_keywords, ThreadOverride};
use crate::validation::{normalize_keywords, validate_key, validate_max_turns};
use crate::Result;

/// Admin-editable override fields. `turns_used` and `paused_by` are not
/// touched by [`upsert_override`].
#[derive(Debug, Clone, Default)]
pub struct OverrideSettings {
    pub max_turns: Option<i64>,
    pub ai_enabled: Option<bool>,
    pub persona: Option<String>,
    pub goal: Option<String>,
    pub escalation_keywords: Option<Vec<String>>,
}

/// Get the override for a conversation, if one exists.
pub async fn get_override(
    pool: &SqlitePool,
    conversation_id: &str,
) -> Result<Option<ThreadOverride>> {
    let record = sqlx::query_as::<_, ThreadOverride>(
        r#"
        SELECT conversation_id, paused_by, max_turns, resume_limit, turns_used, ai_enabled, persona, goal,
               escalation_keywords, updated_at
        FROM thread_overrides
        WHERE conversation_id = ?
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Create or update the admin fields of an override.
///
/// Setting `max_turns` replaces any cap left by an earlier [`resume`].
pub async fn upsert_override(
    pool: &SqlitePool,
    conversation_id: &str,
    settings: &OverrideSettings,
) -> Result<()> {
    if let Some(max_turns) = settings.max_turns {
        validate_max_turns(max_turns)?;
    }
    if let Some(ref persona) = settings.persona {
        validate_key("persona", persona)?;
    }
    if let Some(ref goal) = settings.goal {
        validate_key("goal", goal)?;
    }
    let keywords = match settings.escalation_keywords {
        Some(ref keywords) => Some(encode_keywords(&normalize_keywords(keywords)?)),
        None => None,
    };

    sqlx::query(
        r#"
        INSERT INTO thread_overrides
            (conversation_id, max_turns, ai_enabled, persona, goal, escalation_keywords)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(conversation_id) DO UPDATE SET
            max_turns = excluded.max_turns,
            resume_limit = CASE
                WHEN excluded.max_turns IS NULL THEN thread_overrides.resume_limit
                ELSE NULL
            END,
            ai_enabled = excluded.ai_enabled,
            persona = excluded.persona,
            goal = excluded.goal,
            escalation_keywords = excluded.escalation_keywords,
            updated_at = datetime('now')
        "#,
    )
    .bind(conversation_id)
    .bind(settings.max_turns)
    .bind(settings.ai_enabled)
    .bind(&settings.persona)
    .bind(&settings.goal)
    .bind(keywords)
    .execute(pool)
    .await?;

    Ok(())
}

/// Mark a thread as taken over by a human.
pub async fn pause(pool: &SqlitePool, conversation_id: &str, paused_by: &str) -> Result<()> {
    validate_key("paused_by", paused_by)?;

    sqlx::query(
        r#"
        INSERT INTO thread_overrides (conversation_id, paused_by)
        VALUES (?, ?)
        ON CONFLICT(conversation_id) DO UPDATE SET
            paused_by = excluded.paused_by,
            updated_at = datetime('now')
        "#,
    )
    .bind(conversation_id)
    .bind(paused_by.trim())
    .execute(pool)
    .await?;

    Ok(())
}

/// Re-enable automation on a thread, granting `extra_turns` more turns.
///
/// Clears the pause, sets the resume cap to `turns_used + extra_turns` and
/// clears the conversation's attention flag in one transaction. The admin
/// budget and `turns_used` are left alone. Returns the new cap.
pub async fn resume(pool: &SqlitePool, conversation_id: &str, extra_turns: i64) -> Result<i64> {
    validate_max_turns(extra_turns)?;

    let mut tx = pool.begin().await?;

    let limit: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO thread_overrides (conversation_id, resume_limit)
        VALUES (?, ?)
        ON CONFLICT(conversation_id) DO UPDATE SET
            paused_by = NULL,
            resume_limit = thread_overrides.turns_used + ?,
            updated_at = datetime('now')
        RETURNING resume_limit
        "#,
    )
    .bind(conversation_id)
    .bind(extra_turns)
    .bind(extra_turns)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE conversations
        SET needs_attention = 0, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(conversation_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    limit.ok_or_else(|| DatabaseError::NotFound {
        entity: "ThreadOverride",
        id: conversation_id.to_string(),
    })
}
