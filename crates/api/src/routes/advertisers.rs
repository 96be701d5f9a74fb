//! Advertiser management routes.

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
use adboard_core::catalog::dedupe_by_name;
use adboard_db::entities::advertisers;
use adboard_db::repositories::{
    AdvertiserError, AdvertiserFilter, AdvertiserRepository, CreateAdvertiserInput,
    UpdateAdvertiserInput,
};

/// Creates the advertisers router (requires the auth layer applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/advertisers", get(list_advertisers).post(create_advertiser))
        .route(
            "/advertisers/{id}",
            get(get_advertiser)
                .put(update_advertiser)
                .delete(delete_advertiser),
        )
}

/// Request body for creating or replacing an advertiser.
#[derive(Debug, Deserialize)]
pub struct AdvertiserRequest {
    /// Company or contact name (required).
    pub name: String,
    /// Telegram handle.
    pub telegram: Option<String>,
}

/// Query filters for the advertiser listing.
#[derive(Debug, Deserialize)]
pub struct AdvertiserListQuery {
    /// Substring match on name.
    pub name: Option<String>,
}

/// Response body for an advertiser.
#[derive(Debug, Serialize)]
pub struct AdvertiserResponse {
    /// Advertiser id.
    pub id: i32,
    /// Company or contact name.
    pub name: String,
    /// Telegram handle.
    pub telegram: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<advertisers::Model> for AdvertiserResponse {
    fn from(model: advertisers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            telegram: model.telegram,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

fn validate_request(payload: &AdvertiserRequest) -> Result<(), Response> {
    if payload.name.trim().is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "name_required",
            "Name must not be empty",
        ));
    }
    Ok(())
}

fn map_error(e: &AdvertiserError) -> Response {
    match e {
        AdvertiserError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Advertiser not found")
        }
        AdvertiserError::Database(_) => {
            error!(error = %e, "Advertiser operation failed");
            internal_error()
        }
    }
}

/// GET /advertisers - List advertisers, duplicates collapsed by name.
async fn list_advertisers(
    State(state): State<AppState>,
    Query(query): Query<AdvertiserListQuery>,
) -> impl IntoResponse {
    let repo = AdvertiserRepository::new((*state.db).clone());
    let filter = AdvertiserFilter {
        name_contains: query.name,
    };

    match repo.list(&filter).await {
        Ok(items) => {
            let deduped = dedupe_by_name(items, |a| a.name.as_str());
            let items: Vec<AdvertiserResponse> = deduped.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// POST /advertisers - Create an advertiser.
async fn create_advertiser(
    State(state): State<AppState>,
    Json(payload): Json<AdvertiserRequest>,
) -> impl IntoResponse {
    if let Err(response) = validate_request(&payload) {
        return response;
    }

    let repo = AdvertiserRepository::new((*state.db).clone());
    let input = CreateAdvertiserInput {
        name: payload.name.trim().to_string(),
        telegram: payload.telegram,
    };

    match repo.create(input).await {
        Ok(advertiser) => {
            info!(advertiser_id = advertiser.id, "Advertiser created");
            (
                StatusCode::CREATED,
                Json(AdvertiserResponse::from(advertiser)),
            )
                .into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// GET /advertisers/{id} - Get an advertiser.
async fn get_advertiser(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = AdvertiserRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(advertiser) => {
            (StatusCode::OK, Json(AdvertiserResponse::from(advertiser))).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// PUT /advertisers/{id} - Replace an advertiser's fields.
async fn update_advertiser(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AdvertiserRequest>,
) -> impl IntoResponse {
    if let Err(response) = validate_request(&payload) {
        return response;
    }

    let repo = AdvertiserRepository::new((*state.db).clone());
    let input = UpdateAdvertiserInput {
        name: Some(payload.name.trim().to_string()),
        telegram: Some(payload.telegram),
    };

    match repo.update(id, input).await {
        Ok(advertiser) => {
            (StatusCode::OK, Json(AdvertiserResponse::from(advertiser))).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// DELETE /advertisers/{id} - Delete an advertiser; dependents stay,
/// detached.
async fn delete_advertiser(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = AdvertiserRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(advertiser_id = id, "Advertiser deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_error(&e),
    }
}
