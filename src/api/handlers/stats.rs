//! Handler for per-day click statistics.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::stats::{ClickDateItem, ClickDateListResponse, ClickStatsRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::{resolve_host, short_url};

/// Returns click counts per day for one code or for all codes.
///
/// # Endpoint
///
/// `POST /api/stats/by-day`
///
/// # Request Body
///
/// ```json
/// {
///   "vanity": "promo",         // optional, all codes when absent
///   "start_date": "2024-06-01",
///   "end_date": "2024-06-30"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "s.example.com/promo",
///   "items": [
///     { "date_clicked": "2024-06-01", "count": 12 },
///     { "date_clicked": "2024-06-03", "count": 4 }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if `start_date` is after `end_date`.
pub async fn click_stats_by_day_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ClickStatsRequest>,
) -> Result<Json<ClickDateListResponse>, AppError> {
    payload.validate()?;

    let host = resolve_host(&headers, state.custom_domain.as_deref())?;
    let vanity = payload
        .vanity
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let days = state
        .stats_service
        .click_stats_by_day(vanity, payload.start_date, payload.end_date)
        .await?;

    Ok(Json(ClickDateListResponse {
        url: short_url(&host, vanity.unwrap_or_default()),
        items: days.into_iter().map(ClickDateItem::from).collect(),
    }))
}
