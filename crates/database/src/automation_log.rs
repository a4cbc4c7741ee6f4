//! Append-only automation audit log.

use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{AutomationLogEntry, LogOutcome};
use crate::Result;

/// A log row about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAutomationLog {
    pub org_id: String,
    pub conversation_id: String,
    pub trigger_type: String,
    pub outcome: LogOutcome,
    pub reason: Option<String>,
    pub model: Option<String>,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub cost_usd: f64,
    pub prompt_hash: Option<String>,
    pub delivery_status: Option<String>,
    pub generated_text: Option<String>,
}

impl NewAutomationLog {
    /// A log row with only the identifying fields and outcome set.
    pub fn new(
        org_id: impl Into<String>,
        conversation_id: impl Into<String>,
        trigger_type: impl Into<String>,
        outcome: LogOutcome,
    ) -> Self {
        Self {
            org_id: org_id.into(),
            conversation_id: conversation_id.into(),
            trigger_type: trigger_type.into(),
            outcome,
            reason: None,
            model: None,
            prompt_tokens: 0,
            completion_tokens: 0,
            cost_usd: 0.0,
            prompt_hash: None,
            delivery_status: None,
            generated_text: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.generated_text = Some(text.into());
        self
    }

    pub fn with_delivery_status(mut self, status: impl Into<String>) -> Self {
        self.delivery_status = Some(status.into());
        self
    }
}

/// Append a log row. Returns the new row ID.
pub async fn insert_log(pool: &SqlitePool, entry: &NewAutomationLog) -> Result<i64> {
    let mut conn = pool.acquire().await?;
    insert_log_on(&mut conn, entry).await
}

/// [`insert_log`] on an open connection or transaction.
pub async fn insert_log_on(conn: &mut SqliteConnection, entry: &NewAutomationLog) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO automation_logs
            (org_id, conversation_id, trigger_type, outcome, reason, model, prompt_tokens,
             completion_tokens, cost_usd, prompt_hash, delivery_status, generated_text)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.org_id)
    .bind(&entry.conversation_id)
    .bind(&entry.trigger_type)
    .bind(entry.outcome)
    .bind(&entry.reason)
    .bind(&entry.model)
    .bind(entry.prompt_tokens)
    .bind(entry.completion_tokens)
    .bind(entry.cost_usd)
    .bind(&entry.prompt_hash)
    .bind(&entry.delivery_status)
    .bind(&entry.generated_text)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Trigger type of the newest log row for a conversation, if any.
pub async fn latest_trigger_type(pool: &SqlitePool, conversation_id: &str) -> Result<Option<String>> {
    let trigger_type = sqlx::query_scalar::<_, String>(
        r#"
        SELECT trigger_type
        FROM automation_logs
        WHERE conversation_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    Ok(trigger_type)
}

/// List a conversation's log rows, newest first.
pub async fn list_for_conversation(
    pool: &SqlitePool,
    conversation_id: &str,
) -> Result<Vec<AutomationLogEntry>> {
    let rows = sqlx::query_as::<_, AutomationLogEntry>(
        r#"
        SELECT id, org_id, conversation_id, trigger_type, outcome, reason, model, prompt_tokens,
               completion_tokens, cost_usd, prompt_hash, delivery_status, generated_text,
               created_at
        FROM automation_logs
        WHERE conversation_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
