//! HTTP entrypoint for the reply automation engine.
//!
//! Accepts trigger events from the upstream webhook dispatcher, runs one
//! automation decision per event, and exposes thread takeover endpoints.

mod config;
mod error;
mod routes;
mod state;

use std::env;
use std::sync::Arc;

use database::Database;
use grok_brain::GrokBrain;
use orchestrator::{
    DecisionEngine, EngineConfig, GenerationClient, LoggingSender, MessageSender, SmsSender,
};
use sms_gateway::{GatewayConfig, SmsClient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let engine_config = EngineConfig::from_env()?;
    info!(addr = %config.addr, org_id = %engine_config.org_id, "Starting automation API");

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let generation = generation_client(&engine_config)?;
    let sender = message_sender()?;

    let engine = DecisionEngine::new(engine_config, Arc::new(db.clone()), generation, sender);
    let state = AppState::new(engine, db);

    let app = routes::router().with_state(state);

    info!(addr = %config.addr, "Automation API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Grok when `GROK_API_KEY` is set; otherwise every trigger gets 503.
fn generation_client(config: &EngineConfig) -> Result<GenerationClient, Box<dyn std::error::Error>> {
    let has_key = env::var("GROK_API_KEY").is_ok_and(|key| !key.trim().is_empty());
    if !has_key {
        warn!("GROK_API_KEY not set, triggers will be rejected as provider unavailable");
        return Ok(GenerationClient::unconfigured());
    }

    let brain = GrokBrain::from_env()?;
    info!(model = %brain.config().model, "Generation provider configured");
    Ok(GenerationClient::new(Arc::new(brain), config.generation_timeout))
}

/// SMS when gateway credentials are present; otherwise log-only delivery.
fn message_sender() -> Result<Arc<dyn MessageSender>, Box<dyn std::error::Error>> {
    match GatewayConfig::from_env()? {
        Some(gateway) => {
            let client = SmsClient::new(gateway)?;
            info!("SMS gateway configured");
            Ok(Arc::new(SmsSender::new(client)))
        }
        None => {
            info!("SMS gateway not configured, replies will be logged, not sent");
            Ok(Arc::new(LoggingSender))
        }
    }
}
