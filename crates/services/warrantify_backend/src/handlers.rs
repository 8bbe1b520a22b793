// --- File: crates/services/warrantify_backend/src/handlers.rs ---
//! Operator-facing HTTP handlers.
//!
//! The alert run is a background batch job; none of its failures surface to
//! end users. These endpoints exist for operations: triggering a run on
//! demand and checking liveness.

use crate::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};
use warrantify_scheduler::{RunSummary, SchedulerError};

/// Response body for the manual trigger endpoint.
#[derive(Debug, Serialize)]
pub struct TriggerRunResponse {
    /// Whether a run was executed.
    pub success: bool,

    /// Error message when no run was executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Outcome of the run, when one was executed.
    #[serde(flatten)]
    pub summary: Option<RunSummary>,
}

/// Handler for the "trigger notification check now" action.
///
/// Invokes exactly one scheduler run. While a run is already in flight the
/// request is rejected with 409 rather than queued; the caller can retry
/// once the current run finishes.
#[axum::debug_handler]
pub async fn trigger_run_handler(State(state): State<AppState>) -> Response {
    info!("Manual notification check triggered");

    match state.scheduler.trigger_once().await {
        Ok(summary) => Json(TriggerRunResponse {
            success: true,
            error: None,
            summary: Some(summary),
        })
        .into_response(),
        Err(err @ SchedulerError::AlreadyRunning) => {
            warn!("Manual trigger rejected: {}", err);
            (
                StatusCode::CONFLICT,
                Json(TriggerRunResponse {
                    success: false,
                    error: Some(err.to_string()),
                    summary: None,
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!("Manual alert run failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TriggerRunResponse {
                    success: false,
                    error: Some(err.to_string()),
                    summary: None,
                }),
            )
                .into_response()
        }
    }
}

/// Liveness and store health.
#[axum::debug_handler]
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let database_healthy = state.db_client.is_healthy().await;
    let status = if database_healthy { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "database": database_healthy,
    }))
    .into_response()
}
