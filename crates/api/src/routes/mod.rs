//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod advertisers;
pub mod auth;
pub mod bloggers;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod months;
pub mod orders;
pub mod projects;

/// Creates the API router with protected routes behind the session gate.
///
/// The liveness probe and the login/logout pair stay reachable without a
/// session.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(bloggers::routes())
        .merge(advertisers::routes())
        .merge(months::routes())
        .merge(projects::routes())
        .merge(orders::routes())
        .merge(documents::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Builds a JSON error response in the shape every handler uses.
pub(crate) fn json_error(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

/// Shorthand for the opaque 500 response.
pub(crate) fn internal_error() -> Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An error occurred",
    )
}
