//! `GET /health`: store reachability and click queue state.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse, HealthStatus};
use crate::state::AppState;

/// Probes the record store and the click queue.
///
/// Answers `200 OK` when both probes pass and `503 Service Unavailable`
/// otherwise; the body has the same shape either way:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "click_queue": { "status": "ok", "message": "Free slots: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let checks = HealthChecks {
        database: probe_database(&state).await,
        click_queue: probe_click_queue(&state),
    };

    let (code, status) = if checks.all_ok() {
        (StatusCode::OK, HealthStatus::Healthy)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Degraded)
    };

    let report = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };

    (code, Json(report)).into_response()
}

async fn probe_database(state: &AppState) -> CheckStatus {
    match state.url_service.health_check().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health probe: record store unreachable");
            CheckStatus::error(format!("Database error: {e}"))
        }
    }
}

fn probe_click_queue(state: &AppState) -> CheckStatus {
    let sender = &state.click_sender;
    if sender.is_closed() {
        return CheckStatus::error("Click queue is closed");
    }
    CheckStatus::ok(format!("Free slots: {}", sender.capacity()))
}
