//! Conversation thread records.

use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::Conversation;
use crate::Result;

/// Create a new open conversation.
pub async fn create_conversation(
    pool: &SqlitePool,
    id: &str,
    org_id: &str,
    customer_id: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO conversations (id, org_id, customer_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(org_id)
    .bind(customer_id)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Conversation",
                    id: id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a conversation by ID, if present.
pub async fn get_conversation(pool: &SqlitePool, id: &str) -> Result<Option<Conversation>> {
    let record = sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, org_id, customer_id, status, needs_attention, updated_at
        FROM conversations
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Reopen a conversation and flag it for human attention.
pub async fn reopen_conversation(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET status = 'open', needs_attention = 1, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Conversation",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Close a conversation.
pub async fn close_conversation(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE conversations
        SET status = 'closed', needs_attention = 0, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Conversation",
            id: id.to_string(),
        });
    }

    Ok(())
}
