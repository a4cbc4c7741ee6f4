//! Route handlers for the automation API.

pub mod health;
pub mod threads;
pub mod trigger;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/automation/trigger", post(trigger::trigger))
        .route("/api/threads/:id/pause", post(threads::pause))
        .route("/api/threads/:id/resume", post(threads::resume))
        .route("/api/threads/:id/logs", get(threads::logs))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::response::Response;
    use database::{automation_rule, conversation, customer, Customer, Database, RuleSettings};
    use mock_brain::ScriptedBrain;
    use orchestrator::{DecisionEngine, EngineConfig, GenerationClient, LoggingSender};

    use crate::state::AppState;

    /// State over an in-memory store with one open thread (`conv-1`) and an
    /// enabled `new_message` rule.
    pub async fn seeded_state(provider_configured: bool) -> AppState {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        let cust = Customer {
            id: "cust-1".to_string(),
            org_id: "org-1".to_string(),
            name: "Dana".to_string(),
            phone: None,
            business: None,
        };
        customer::create_customer(db.pool(), &cust).await.unwrap();
        conversation::create_conversation(db.pool(), "conv-1", "org-1", Some("cust-1"))
            .await
            .unwrap();
        let rule = RuleSettings {
            enabled: true,
            ai_enabled: true,
            max_turns: Some(3),
            ..Default::default()
        };
        automation_rule::upsert_rule(db.pool(), "org-1", "new_message", &rule)
            .await
            .unwrap();

        let generation = if provider_configured {
            GenerationClient::new(
                Arc::new(ScriptedBrain::replying("What vehicle is it for?")),
                Duration::from_secs(5),
            )
        } else {
            GenerationClient::unconfigured()
        };
        let engine = DecisionEngine::new(
            EngineConfig::new("org-1"),
            Arc::new(db.clone()),
            generation,
            Arc::new(LoggingSender),
        );
        AppState::new(engine, db)
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_provider() {
        let state = seeded_state(true).await;
        let axum::Json(health) = super::health::health(axum::extract::State(state)).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.provider.as_deref(), Some("ScriptedBrain"));

        let state = seeded_state(false).await;
        let axum::Json(health) = super::health::health(axum::extract::State(state)).await;
        assert!(health.provider.is_none());
    }
}
