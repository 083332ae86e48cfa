//! Handlers for short URL management endpoints.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::urls::{
    ArchiveResponse, CreateUrlRequest, CreateUrlResponse, UpdateUrlRequest, UrlListResponse,
    UrlRecordResponse, VanityRequest,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::resolve_host;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/landing",
///   "vanity": "promo",          // optional, generated when blank
///   "title": "Spring promo",    // optional
///   "schedules": [              // optional
///     {
///       "start": "2024-06-01T00:00:00Z",
///       "end": "2024-06-02T00:00:00Z",
///       "alternative_url": "https://example.com/sale"
///     }
///   ]
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_url": "s.example.com/promo",
///   "long_url": "https://example.com/landing",
///   "title": "Spring promo"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL, a schedule or the vanity is invalid
/// - 409 if the vanity is already taken
pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    payload.validate()?;

    let host = resolve_host(&headers, state.custom_domain.as_deref())?;
    let view = state
        .url_service
        .create(payload.into(), &host, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: view.short_url,
            long_url: view.record.url,
            title: view.record.title,
        }),
    ))
}

/// Lists active (non-archived) short URLs.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// Each item carries `short_url` and the `active_url` in effect right now.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UrlListResponse>, AppError> {
    let host = resolve_host(&headers, state.custom_domain.as_deref())?;
    let views = state.url_service.list(&host, Utc::now()).await?;

    Ok(Json(UrlListResponse {
        items: views.into_iter().map(UrlRecordResponse::from).collect(),
    }))
}

/// Lists archived short URLs.
///
/// # Endpoint
///
/// `GET /api/urls/archived`
pub async fn list_archived_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UrlListResponse>, AppError> {
    let host = resolve_host(&headers, state.custom_domain.as_deref())?;
    let views = state.url_service.list_archived(&host, Utc::now()).await?;

    Ok(Json(UrlListResponse {
        items: views.into_iter().map(UrlRecordResponse::from).collect(),
    }))
}

/// Replaces the destination, title and schedules of a short URL.
///
/// # Endpoint
///
/// `POST /api/urls/update`
///
/// # Errors
///
/// - 400 if the URL or a schedule is invalid
/// - 404 if the code does not exist
pub async fn update_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlRecordResponse>, AppError> {
    payload.validate()?;

    let host = resolve_host(&headers, state.custom_domain.as_deref())?;
    let (vanity, update) = payload.into_parts();
    let view = state
        .url_service
        .update(&vanity, update, &host, Utc::now())
        .await?;

    Ok(Json(view.into()))
}

/// Archives a short URL.
///
/// # Endpoint
///
/// `POST /api/urls/archive`
pub async fn archive_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<VanityRequest>,
) -> Result<Json<ArchiveResponse>, AppError> {
    payload.validate()?;

    let record = state.url_service.archive(&payload.vanity).await?;

    Ok(Json(ArchiveResponse {
        vanity: record.vanity,
        is_archived: record.is_archived,
    }))
}

/// Reactivates an archived short URL.
///
/// # Endpoint
///
/// `POST /api/urls/reactivate`
pub async fn reactivate_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<VanityRequest>,
) -> Result<Json<ArchiveResponse>, AppError> {
    payload.validate()?;

    let record = state.url_service.reactivate(&payload.vanity).await?;

    Ok(Json(ArchiveResponse {
        vanity: record.vanity,
        is_archived: record.is_archived,
    }))
}

/// Permanently deletes a short URL.
///
/// # Endpoint
///
/// `POST /api/urls/delete`
///
/// # Response Codes
///
/// - **204 No Content**: Deleted
/// - **404 Not Found**: Unknown code
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<VanityRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state.url_service.delete(&payload.vanity).await?;

    Ok(StatusCode::NO_CONTENT)
}
