//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database, click queue (public)
//! - `GET  /{*code}`     - Short URL redirect (public)
//! - `/api/*`            - Management API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter for the API
//! - **Authentication** - Bearer token for `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{auth, rate_limit, tracing};
use crate::api::routes::{protected_routes, public_routes};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

fn authenticated_api(state: &AppState) -> Router<AppState> {
    protected_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}

/// All routes with authentication applied, without rate limiting or tracing.
///
/// Used where no peer address is available, such as in-process tests.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .nest("/api", authenticated_api(state))
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api = authenticated_api(&state);

    let (public, api) = if behind_proxy {
        (
            public_routes().layer(rate_limit::proxy_layer(rate_limit::PUBLIC)),
            api.layer(rate_limit::proxy_layer(rate_limit::API)),
        )
    } else {
        (
            public_routes().layer(rate_limit::layer(rate_limit::PUBLIC)),
            api.layer(rate_limit::layer(rate_limit::API)),
        )
    };

    let router = Router::new()
        .merge(public)
        .nest("/api", api)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
