//! Project management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::routes::{internal_error, json_error, orders::OrderResponse};
use crate::AppState;
use adboard_db::entities::projects;
use adboard_db::repositories::{
    CreateProjectInput, ProjectError, ProjectFilter, ProjectRepository, UpdateProjectInput,
};

/// Creates the projects router (requires the auth layer applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}

/// Request body for creating or replacing a project.
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    /// Project name (required).
    pub name: String,
    /// Month the project is grouped under.
    pub month_id: Option<i32>,
    /// Advertiser the project runs for.
    pub advertiser_id: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Query filters for the project listing.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    /// Substring match on name.
    pub name: Option<String>,
    /// Exact match on owning month.
    pub month_id: Option<i32>,
    /// Exact match on advertiser.
    pub advertiser_id: Option<i32>,
}

/// Response body for a project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project id.
    pub id: i32,
    /// Project name.
    pub name: String,
    /// Month reference.
    pub month_id: Option<i32>,
    /// Advertiser reference; null when unset or the advertiser was deleted.
    pub advertiser_id: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
    /// Stored status value.
    pub status: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<projects::Model> for ProjectResponse {
    fn from(model: projects::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            month_id: model.month_id,
            advertiser_id: model.advertiser_id,
            description: model.description,
            status: model.status,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Project detail: the project, its orders, and derived profit.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    /// The project.
    #[serde(flatten)]
    pub project: ProjectResponse,
    /// The project's orders, earliest posting date first.
    pub orders: Vec<OrderResponse>,
    /// Sum of `cost - blogger_fee` over the orders.
    pub profit: Decimal,
}

fn validate_request(payload: &ProjectRequest) -> Result<(), Response> {
    if payload.name.trim().is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "name_required",
            "Name must not be empty",
        ));
    }
    Ok(())
}

fn map_error(e: &ProjectError) -> Response {
    match e {
        ProjectError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Project not found")
        }
        ProjectError::Database(_) => {
            error!(error = %e, "Project operation failed");
            internal_error()
        }
    }
}

/// GET /projects - List projects, newest first.
async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());
    let filter = ProjectFilter {
        name_contains: query.name,
        month_id: query.month_id,
        advertiser_id: query.advertiser_id,
    };

    match repo.list(&filter).await {
        Ok(items) => {
            let items: Vec<ProjectResponse> = items.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// POST /projects - Create a project.
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<ProjectRequest>,
) -> impl IntoResponse {
    if let Err(response) = validate_request(&payload) {
        return response;
    }

    let repo = ProjectRepository::new((*state.db).clone());
    let input = CreateProjectInput {
        name: payload.name.trim().to_string(),
        month_id: payload.month_id,
        advertiser_id: payload.advertiser_id,
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(project) => {
            info!(project_id = project.id, "Project created");
            (StatusCode::CREATED, Json(ProjectResponse::from(project))).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// GET /projects/{id} - Project with its orders and derived profit.
async fn get_project(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.find_with_orders(id).await {
        Ok(detail) => {
            let response = ProjectDetailResponse {
                project: ProjectResponse::from(detail.project),
                orders: detail.orders.into_iter().map(Into::into).collect(),
                profit: detail.profit,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// PUT /projects/{id} - Replace a project's fields.
///
/// The stored `status` value is deliberately not writable here.
async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProjectRequest>,
) -> impl IntoResponse {
    if let Err(response) = validate_request(&payload) {
        return response;
    }

    let repo = ProjectRepository::new((*state.db).clone());
    let input = UpdateProjectInput {
        name: Some(payload.name.trim().to_string()),
        month_id: Some(payload.month_id),
        advertiser_id: Some(payload.advertiser_id),
        description: Some(payload.description),
    };

    match repo.update(id, input).await {
        Ok(project) => (StatusCode::OK, Json(ProjectResponse::from(project))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// DELETE /projects/{id} - Delete a project and, with it, its orders and
/// documents.
async fn delete_project(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(project_id = id, "Project deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_error(&e),
    }
}

#[cfg(test)]
mod integration_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::test_state;

    async fn app() -> Router {
        let state = test_state().await;
        Router::new()
            .merge(super::routes())
            .merge(crate::routes::orders::routes())
            .with_state(state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn test_project_detail_reports_profit() {
        let app = app().await;

        let created = app
            .clone()
            .oneshot(post_json("/projects", r#"{"name":"Spring push"}"#))
            .await
            .expect("create project");
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = created.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        let project_id = json["id"].as_i64().expect("id");

        for (cost, fee) in [("100", "20"), ("50", "50")] {
            let response = app
                .clone()
                .oneshot(post_json(
                    "/orders",
                    &format!(
                        r#"{{"project_id":{project_id},"cost":"{cost}","blogger_fee":"{fee}"}}"#
                    ),
                ))
                .await
                .expect("create order");
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let detail = app
            .oneshot(
                Request::builder()
                    .uri(format!("/projects/{project_id}"))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");
        let body = detail.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");

        assert_eq!(json["profit"], "80");
        assert_eq!(json["orders"].as_array().expect("orders").len(), 2);
    }

    #[tokio::test]
    async fn test_missing_project_is_404() {
        let app = app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/projects/41")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
