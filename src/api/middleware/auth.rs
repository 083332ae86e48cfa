//! Bearer token guard for the management API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

type BearerRejection = <AuthBearer as FromRequestParts<AppState>>::Rejection;

/// Lets a request through only when its `Authorization: Bearer <token>`
/// header carries a token whose digest is configured.
///
/// Failures render as `401` with `WWW-Authenticate: Bearer`. The raw token
/// is never logged.
///
/// ```rust,ignore
/// let api = protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    bearer: Result<AuthBearer, BearerRejection>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Ok(AuthBearer(token)) = bearer else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Authorization header is missing or invalid" }),
        ));
    };

    if let Err(e) = state.auth_service.authenticate(&token) {
        tracing::warn!(path = %req.uri().path(), "Rejected API request with unknown token");
        return Err(e);
    }

    Ok(next.run(req).await)
}
