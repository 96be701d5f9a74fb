//! Session-cookie authentication middleware for protected routes.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tracing::error;

use crate::AppState;
use adboard_db::SessionRepository;

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "adboard_session";

/// Authentication middleware that validates the session cookie.
///
/// This middleware:
/// 1. Extracts the session token from the cookie
/// 2. Looks the token up in the sessions table (revocation and expiry
///    included)
/// 3. Lets the request through only for a live session
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_session",
                "message": "Login is required"
            })),
        )
            .into_response();
    };

    let sessions = SessionRepository::new((*state.db).clone());

    match sessions.find_valid(&token).await {
        Ok(Some(_)) => next.run(request).await,
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_session",
                "message": "Session is expired or revoked, log in again"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to validate session");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
