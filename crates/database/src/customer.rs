//! Customer lookups.

use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::Customer;
use crate::Result;

/// Create a new customer.
pub async fn create_customer(pool: &SqlitePool, customer: &Customer) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO customers (id, org_id, name, phone, business)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&customer.id)
    .bind(&customer.org_id)
    .bind(&customer.name)
    .bind(&customer.phone)
    .bind(&customer.business)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Customer",
                    id: customer.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a customer by ID, if present.
pub async fn get_customer(pool: &SqlitePool, id: &str) -> Result<Option<Customer>> {
    let record = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, org_id, name, phone, business
        FROM customers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}
