//! Trigger entrypoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use orchestrator::{Decision, TriggerEvent};
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Wire shape of a decision.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TriggerResponse {
    Skipped {
        skipped: String,
    },
    Escalated {
        escalated: bool,
        reason: String,
    },
    Sent {
        sent: String,
        #[serde(rename = "turnsUsed")]
        turns_used: i64,
    },
}

impl From<Decision> for TriggerResponse {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Skipped(reason) => TriggerResponse::Skipped {
                skipped: reason.as_str().to_string(),
            },
            Decision::Escalated(reason) => TriggerResponse::Escalated {
                escalated: true,
                reason: reason.as_str().to_string(),
            },
            Decision::Sent { text, turns_used } => TriggerResponse::Sent {
                sent: text,
                turns_used,
            },
        }
    }
}

/// Run one automation decision for an inbound trigger.
pub async fn trigger(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TriggerEvent>, JsonRejection>,
) -> Result<Json<TriggerResponse>> {
    let Json(trigger) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let decision = state.engine.process(&trigger).await?;
    Ok(Json(decision.into()))
}
