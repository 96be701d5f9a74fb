//! Blogger management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::routes::{internal_error, json_error};
use crate::AppState;
use adboard_core::catalog::{dedupe_by_name, is_known_platform};
use adboard_db::entities::bloggers;
use adboard_db::repositories::{
    BloggerError, BloggerFilter, BloggerRepository, CreateBloggerInput, UpdateBloggerInput,
};

/// Creates the bloggers router (requires the auth layer applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bloggers", get(list_bloggers).post(create_blogger))
        .route(
            "/bloggers/{id}",
            get(get_blogger).put(update_blogger).delete(delete_blogger),
        )
}

/// Request body for creating or replacing a blogger.
#[derive(Debug, Deserialize)]
pub struct BloggerRequest {
    /// Display name (required).
    pub name: String,
    /// Publishing platform.
    pub platform: Option<String>,
    /// Channel or profile link.
    pub link: Option<String>,
    /// Contact link for outreach.
    pub contact_link: Option<String>,
    /// Advertising-register details.
    pub rkn_info: Option<String>,
    /// Telegram handle.
    pub telegram: Option<String>,
}

/// Query filters for the blogger listing.
#[derive(Debug, Deserialize)]
pub struct BloggerListQuery {
    /// Substring match on name.
    pub name: Option<String>,
    /// Exact match on platform.
    pub platform: Option<String>,
}

/// Response body for a blogger.
#[derive(Debug, Serialize)]
pub struct BloggerResponse {
    /// Blogger id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Publishing platform.
    pub platform: Option<String>,
    /// Channel or profile link.
    pub link: Option<String>,
    /// Contact link for outreach.
    pub contact_link: Option<String>,
    /// Advertising-register details.
    pub rkn_info: Option<String>,
    /// Telegram handle.
    pub telegram: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<bloggers::Model> for BloggerResponse {
    fn from(model: bloggers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            platform: model.platform,
            link: model.link,
            contact_link: model.contact_link,
            rkn_info: model.rkn_info,
            telegram: model.telegram,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Checks the fields every blogger write must satisfy.
fn validate_request(payload: &BloggerRequest) -> Result<(), Response> {
    if payload.name.trim().is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "name_required",
            "Name must not be empty",
        ));
    }
    if let Some(platform) = &payload.platform
        && !is_known_platform(platform)
    {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "unknown_platform",
            "Platform must be one of: tiktok, tg, insta, youtube",
        ));
    }
    Ok(())
}

fn map_error(e: &BloggerError) -> Response {
    match e {
        BloggerError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Blogger not found")
        }
        BloggerError::Database(_) => {
            error!(error = %e, "Blogger operation failed");
            internal_error()
        }
    }
}

/// GET /bloggers - List bloggers, duplicates collapsed by name.
async fn list_bloggers(
    State(state): State<AppState>,
    Query(query): Query<BloggerListQuery>,
) -> impl IntoResponse {
    let repo = BloggerRepository::new((*state.db).clone());
    let filter = BloggerFilter {
        name_contains: query.name,
        platform: query.platform,
    };

    match repo.list(&filter).await {
        Ok(items) => {
            let deduped = dedupe_by_name(items, |b| b.name.as_str());
            let items: Vec<BloggerResponse> = deduped.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// POST /bloggers - Create a blogger.
async fn create_blogger(
    State(state): State<AppState>,
    Json(payload): Json<BloggerRequest>,
) -> impl IntoResponse {
    if let Err(response) = validate_request(&payload) {
        return response;
    }

    let repo = BloggerRepository::new((*state.db).clone());
    let input = CreateBloggerInput {
        name: payload.name.trim().to_string(),
        platform: payload.platform,
        link: payload.link,
        contact_link: payload.contact_link,
        rkn_info: payload.rkn_info,
        telegram: payload.telegram,
    };

    match repo.create(input).await {
        Ok(blogger) => {
            info!(blogger_id = blogger.id, "Blogger created");
            (StatusCode::CREATED, Json(BloggerResponse::from(blogger))).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// GET /bloggers/{id} - Get a blogger.
async fn get_blogger(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = BloggerRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(blogger) => (StatusCode::OK, Json(BloggerResponse::from(blogger))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// PUT /bloggers/{id} - Replace a blogger's fields.
async fn update_blogger(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BloggerRequest>,
) -> impl IntoResponse {
    if let Err(response) = validate_request(&payload) {
        return response;
    }

    let repo = BloggerRepository::new((*state.db).clone());
    let input = UpdateBloggerInput {
        name: Some(payload.name.trim().to_string()),
        platform: Some(payload.platform),
        link: Some(payload.link),
        contact_link: Some(payload.contact_link),
        rkn_info: Some(payload.rkn_info),
        telegram: Some(payload.telegram),
    };

    match repo.update(id, input).await {
        Ok(blogger) => (StatusCode::OK, Json(BloggerResponse::from(blogger))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// DELETE /bloggers/{id} - Delete a blogger; their orders stay, detached.
async fn delete_blogger(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = BloggerRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(blogger_id = id, "Blogger deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_error(&e),
    }
}
