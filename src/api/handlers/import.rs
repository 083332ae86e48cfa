//! Handlers for bulk data import.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::import::{ImportClicksRequest, ImportResponse, ImportUrlsRequest};
use crate::domain::entities::{ClickStat, ShortUrl};
use crate::error::AppError;
use crate::state::AppState;

/// Upserts short URL records and optionally sets the code counter.
///
/// # Endpoint
///
/// `POST /api/import/urls`
///
/// A batch with any non-http(s) destination or invalid schedule is rejected
/// with `400` before anything is written. Otherwise records are written in
/// order; the first store failure aborts the rest and is returned, leaving
/// earlier records in place.
pub async fn import_urls_handler(
    State(state): State<AppState>,
    Json(payload): Json<ImportUrlsRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    payload.validate()?;

    let records: Vec<ShortUrl> = payload.items.into_iter().map(ShortUrl::from).collect();
    let imported = state.url_service.import(&records, payload.next_id).await?;

    Ok(Json(ImportResponse { imported }))
}

/// Upserts click-statistics rows.
///
/// # Endpoint
///
/// `POST /api/import/clicks`
pub async fn import_clicks_handler(
    State(state): State<AppState>,
    Json(payload): Json<ImportClicksRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    payload.validate()?;

    let stats: Vec<ClickStat> = payload.items.into_iter().map(ClickStat::from).collect();
    let imported = state.stats_service.import(&stats).await?;

    Ok(Json(ImportResponse { imported }))
}
