//! SQLite persistence for reply automation.
//!
//! Holds organization rules, per-thread overrides, conversation history and
//! the automation audit log, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{automation_rule, Database};
//! use database::automation_rule::RuleSettings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:automation.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let settings = RuleSettings {
//!         enabled: true,
//!         ai_enabled: true,
//!         max_turns: Some(3),
//!         persona: Some("professional".to_string()),
//!         ..Default::default()
//!     };
//!     automation_rule::upsert_rule(db.pool(), "org-1", "new_message", &settings).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod automation_log;
pub mod automation_rule;
pub mod conversation;
pub mod customer;
pub mod error;
pub mod message;
pub mod models;
pub mod thread_override;
pub mod turn;
pub mod validation;

pub use automation_log::NewAutomationLog;
pub use automation_rule::RuleSettings;
pub use error::{DatabaseError, Result};
pub use models::{
    AutomationLogEntry, AutomationRule, Conversation, ConversationMessage, Customer, LogOutcome,
    MessageDirection, ThreadOverride,
};
pub use thread_override::OverrideSettings;
pub use turn::AutomatedTurn;
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    const DEFAULT_POOL_SIZE: u32 = 8;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// An in-memory database needs a pool size of 1, since every pooled
    /// connection would otherwise open its own empty database.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
