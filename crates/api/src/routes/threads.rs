//! Human takeover and audit endpoints for a conversation thread.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use database::{automation_log, AutomationLogEntry};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseRequest {
    pub paused_by: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    #[serde(default)]
    pub extra_turns: Option<i64>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadStatus {
    pub conversation_id: String,
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<i64>,
}

/// Hand a thread to a human; automation skips it until resumed.
pub async fn pause(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<PauseRequest>, JsonRejection>,
) -> Result<Json<ThreadStatus>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state.engine.pause_thread(&id, &request.paused_by).await?;

    Ok(Json(ThreadStatus {
        conversation_id: id,
        paused: true,
        max_turns: None,
    }))
}

/// Re-enable automation on a thread.
pub async fn resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ResumeRequest>>,
) -> Result<Json<ThreadStatus>> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    if request.extra_turns.is_some_and(|n| n < 0) {
        return Err(ApiError::BadRequest("extraTurns must not be negative".to_string()));
    }

    let max_turns = state.engine.resume_thread(&id, request.extra_turns).await?;

    Ok(Json(ThreadStatus {
        conversation_id: id,
        paused: false,
        max_turns: Some(max_turns),
    }))
}

/// Automation audit log for a thread, newest first.
pub async fn logs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AutomationLogEntry>>> {
    let entries = automation_log::list_for_conversation(state.db.pool(), &id).await?;
    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::seeded_state;
    use crate::routes::trigger::{trigger, TriggerResponse};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use orchestrator::TriggerEvent;

    #[tokio::test]
    async fn test_pause_then_resume() {
        let state = seeded_state(true).await;

        let Json(status) = pause(
            State(state.clone()),
            Path("conv-1".to_string()),
            Ok(Json(PauseRequest {
                paused_by: "agent-7".to_string(),
            })),
        )
        .await
        .unwrap();
        assert!(status.paused);

        let event = TriggerEvent::new("new_message", "conv-1").with_message("hello?");
        let Json(response) = trigger(State(state.clone()), Ok(Json(event.clone())))
            .await
            .unwrap();
        assert_eq!(
            response,
            TriggerResponse::Skipped {
                skipped: "paused".to_string()
            }
        );

        let Json(status) = resume(
            State(state.clone()),
            Path("conv-1".to_string()),
            Some(Json(ResumeRequest {
                extra_turns: Some(2),
            })),
        )
        .await
        .unwrap();
        assert!(!status.paused);
        assert_eq!(status.max_turns, Some(2));

        let Json(response) = trigger(State(state.clone()), Ok(Json(event))).await.unwrap();
        assert!(matches!(response, TriggerResponse::Sent { turns_used: 1, .. }));

        let Json(entries) = logs(State(state), Path("conv-1".to_string())).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].reason.as_deref(), Some("paused"));
    }

    #[tokio::test]
    async fn test_pause_requires_agent() {
        let state = seeded_state(true).await;
        let err = pause(
            State(state),
            Path("conv-1".to_string()),
            Ok(Json(PauseRequest {
                paused_by: " ".to_string(),
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_unknown_thread() {
        let state = seeded_state(true).await;
        let err = resume(State(state), Path("conv-404".to_string()), None)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_rejects_negative_turns() {
        let state = seeded_state(true).await;
        let err = resume(
            State(state),
            Path("conv-1".to_string()),
            Some(Json(ResumeRequest {
                extra_turns: Some(-1),
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
