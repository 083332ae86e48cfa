//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to the destination active right now.
///
/// # Endpoint
///
/// `GET /{*code}`
///
/// The code may contain `/`; percent-encoded characters are decoded.
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped with a warning.
///
/// # Response Codes
///
/// - **302 Found**: Redirect to the active URL, or to the configured default
///   redirect when the code is unknown
/// - **404 Not Found**: Unknown code and no default redirect configured
/// - **410 Gone**: The short URL is archived
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let now = Utc::now();

    let target = match state.url_service.resolve_redirect(&code, now).await {
        Ok(url) => url,
        Err(e @ AppError::NotFound { .. }) => match &state.default_redirect_url {
            Some(fallback) => {
                tracing::debug!(code, fallback, "Unknown code, using default redirect");
                return Ok(found(fallback));
            }
            None => return Err(e),
        },
        Err(e) => return Err(e),
    };

    if let Err(e) = state.click_sender.try_send(ClickEvent::new(code, now)) {
        metrics::counter!("clicks_dropped_total").increment(1);
        tracing::warn!(error = %e, "Click event dropped");
    }

    Ok(found(&target))
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
