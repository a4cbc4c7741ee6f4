//! Conversation message history.

use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{ConversationMessage, MessageDirection};
use crate::Result;

/// Append a message to a conversation. Returns the new message ID.
pub async fn insert_message(
    pool: &SqlitePool,
    conversation_id: &str,
    direction: MessageDirection,
    body: &str,
    automated: bool,
) -> Result<i64> {
    let mut conn = pool.acquire().await?;
    insert_message_on(&mut conn, conversation_id, direction, body, automated).await
}

/// [`insert_message`] on an open connection or transaction.
pub async fn insert_message_on(
    conn: &mut SqliteConnection,
    conversation_id: &str,
    direction: MessageDirection,
    body: &str,
    automated: bool,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO messages (conversation_id, direction, body, automated)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(conversation_id)
    .bind(direction)
    .bind(body)
    .bind(automated)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get the most recent messages of a conversation, oldest first.
pub async fn list_recent(
    pool: &SqlitePool,
    conversation_id: &str,
    limit: i64,
) -> Result<Vec<ConversationMessage>> {
    let mut rows = sqlx::query_as::<_, ConversationMessage>(
        r#"
        SELECT id, conversation_id, direction, body, automated, created_at
        FROM messages
        WHERE conversation_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(conversation_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.reverse();
    Ok(rows)
}

/// Count all messages in a conversation.
pub async fn count_messages(pool: &SqlitePool, conversation_id: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM messages WHERE conversation_id = ?
        "#,
    )
    .bind(conversation_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
