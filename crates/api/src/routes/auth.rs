//! Authentication routes for the shared-password gate.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::middleware::SESSION_COOKIE;
use crate::routes::{internal_error, json_error};
use crate::AppState;
use adboard_db::SessionRepository;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The shared password.
    pub password: String,
}

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// POST /auth/login - Verify the shared password and open a session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if payload.password != state.auth.password {
        info!("Failed login attempt");
        return json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid password",
        );
    }

    let token = uuid::Uuid::new_v4().to_string();
    let ttl_hours = i64::try_from(state.auth.session_ttl_hours).unwrap_or(i64::MAX);
    let expires_at = Utc::now() + Duration::hours(ttl_hours);

    let sessions = SessionRepository::new((*state.db).clone());
    if let Err(e) = sessions.create(&token, expires_at).await {
        error!(error = %e, "Failed to create session");
        return internal_error();
    }

    info!("Session opened");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), (StatusCode::OK, Json(json!({ "status": "ok" })))).into_response()
}

/// POST /auth/logout - Revoke the session and clear the cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let sessions = SessionRepository::new((*state.db).clone());
        if let Err(e) = sessions.revoke_by_token(cookie.value()).await {
            error!(error = %e, "Failed to revoke session");
            return internal_error();
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT).into_response()
}
