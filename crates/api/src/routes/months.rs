//! Month management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::routes::{internal_error, json_error, orders::OrderResponse, projects::ProjectResponse};
use crate::AppState;
use adboard_db::entities::months;
use adboard_db::repositories::{CreateMonthInput, MonthError, MonthRepository, UpdateMonthInput};

/// Creates the months router (requires the auth layer applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/months", get(list_months).post(create_month))
        .route(
            "/months/{id}",
            get(get_month).put(update_month).delete(delete_month),
        )
}

/// Request body for creating or replacing a month.
#[derive(Debug, Deserialize)]
pub struct MonthRequest {
    /// Month label, e.g. "March 2025".
    pub name: Option<String>,
}

/// Response body for a month.
#[derive(Debug, Serialize)]
pub struct MonthResponse {
    /// Month id.
    pub id: i32,
    /// Month label.
    pub name: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<months::Model> for MonthResponse {
    fn from(model: months::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

fn map_error(e: &MonthError) -> Response {
    match e {
        MonthError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Month not found")
        }
        MonthError::Database(_) => {
            error!(error = %e, "Month operation failed");
            internal_error()
        }
    }
}

/// GET /months - List months, newest first.
async fn list_months(State(state): State<AppState>) -> impl IntoResponse {
    let repo = MonthRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(items) => {
            let items: Vec<MonthResponse> = items.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// POST /months - Create a month.
async fn create_month(
    State(state): State<AppState>,
    Json(payload): Json<MonthRequest>,
) -> impl IntoResponse {
    let repo = MonthRepository::new((*state.db).clone());

    match repo.create(CreateMonthInput { name: payload.name }).await {
        Ok(month) => {
            info!(month_id = month.id, "Month created");
            (StatusCode::CREATED, Json(MonthResponse::from(month))).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// GET /months/{id} - Month with its projects and direct orders.
///
/// Direct orders are the month's orders that have no project; the rest show
/// up under their project.
async fn get_month(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = MonthRepository::new((*state.db).clone());

    match repo.find_detail(id).await {
        Ok(detail) => {
            let projects: Vec<ProjectResponse> =
                detail.projects.into_iter().map(Into::into).collect();
            let orders: Vec<OrderResponse> = detail.orders.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "month": MonthResponse::from(detail.month),
                    "projects": projects,
                    "orders": orders
                })),
            )
                .into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// PUT /months/{id} - Replace a month's fields.
async fn update_month(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MonthRequest>,
) -> impl IntoResponse {
    let repo = MonthRepository::new((*state.db).clone());

    match repo
        .update(
            id,
            UpdateMonthInput {
                name: Some(payload.name),
            },
        )
        .await
    {
        Ok(month) => (StatusCode::OK, Json(MonthResponse::from(month))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// DELETE /months/{id} - Delete a month; its projects and orders stay,
/// detached.
async fn delete_month(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = MonthRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(month_id = id, "Month deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_error(&e),
    }
}
