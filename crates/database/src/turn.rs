//! Atomic persistence of one automated turn.

use sqlx::SqlitePool;
use tracing::debug;

use crate::automation_log::{insert_log_on, NewAutomationLog};
use crate::error::DatabaseError;
use crate::message::insert_message_on;
use crate::models::MessageDirection;
use crate::Result;

/// Everything written when an automated reply is sent.
#[derive(Debug, Clone)]
pub struct AutomatedTurn {
    pub conversation_id: String,
    /// The reply text appended to the conversation.
    pub body: String,
    /// `turns_used` as read before this turn was approved.
    pub expected_turns_used: i64,
    /// The `sent` audit row.
    pub log: NewAutomationLog,
}

/// Write the outbound message, the audit row and the turn increment in one
/// transaction.
///
/// The increment only applies if `turns_used` still equals
/// `expected_turns_used`; otherwise nothing is written and
/// [`DatabaseError::Conflict`] is returned. Returns the new `turns_used`.
pub async fn record_automated_turn(pool: &SqlitePool, turn: &AutomatedTurn) -> Result<i64> {
    let mut tx = pool.begin().await?;

    insert_message_on(
        &mut tx,
        &turn.conversation_id,
        MessageDirection::Outbound,
        &turn.body,
        true,
    )
    .await?;

    insert_log_on(&mut tx, &turn.log).await?;

    sqlx::query(
        r#"
        INSERT INTO thread_overrides (conversation_id)
        VALUES (?)
        ON CONFLICT(conversation_id) DO NOTHING
        "#,
    )
    .bind(&turn.conversation_id)
    .execute(&mut *tx)
    .await?;

    let updated = sqlx::query(
        r#"
        UPDATE thread_overrides
        SET turns_used = turns_used + 1, updated_at = datetime('now')
        WHERE conversation_id = ? AND turns_used = ?
        "#,
    )
    .bind(&turn.conversation_id)
    .bind(turn.expected_turns_used)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        // Dropping the transaction rolls it back.
        return Err(DatabaseError::Conflict {
            entity: "ThreadOverride",
            id: turn.conversation_id.clone(),
        });
    }

    sqlx::query(
        r#"
        UPDATE conversations SET updated_at = datetime('now') WHERE id = ?
        "#,
    )
    .bind(&turn.conversation_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let turns_used = turn.expected_turns_used + 1;
    debug!(
        conversation_id = %turn.conversation_id,
        turns_used,
        "Recorded automated turn"
    );
    Ok(turns_used)
}
