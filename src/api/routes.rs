//! API route configuration.

use crate::api::handlers::{
    archive_url_handler, click_stats_by_day_handler, create_url_handler, delete_url_handler,
    health_handler, import_clicks_handler, import_urls_handler, list_archived_urls_handler,
    list_urls_handler, reactivate_url_handler, redirect_handler, update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Management routes, mounted under `/api`. Callers add authentication.
///
/// # Endpoints
///
/// - `GET  /urls`              - List active short URLs
/// - `POST /urls`              - Create a short URL
/// - `GET  /urls/archived`     - List archived short URLs
/// - `POST /urls/update`       - Replace destination, title and schedules
/// - `POST /urls/archive`      - Archive a short URL
/// - `POST /urls/reactivate`   - Reactivate an archived short URL
/// - `POST /urls/delete`       - Permanently delete a short URL
/// - `POST /stats/by-day`      - Per-day click counts
/// - `POST /import/urls`       - Bulk import short URLs
/// - `POST /import/clicks`     - Bulk import click statistics
///
/// Codes travel in request bodies since they may contain `/`, `?` or `#`.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/archived", get(list_archived_urls_handler))
        .route("/urls/update", post(update_url_handler))
        .route("/urls/archive", post(archive_url_handler))
        .route("/urls/reactivate", post(reactivate_url_handler))
        .route("/urls/delete", post(delete_url_handler))
        .route("/stats/by-day", post(click_stats_by_day_handler))
        .route("/import/urls", post(import_urls_handler))
        .route("/import/clicks", post(import_clicks_handler))
}

/// Unauthenticated routes: health check and the catch-all redirect.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{*code}", get(redirect_handler))
}
