//! Order management routes.
//!
//! The order form speaks `dd.mm.yyyy` dates and a selector convention where
//! value `0` means "create a new blogger/advertiser from the inline name
//! fields". Both are translated here, before the store is touched.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::routes::{internal_error, json_error};
use crate::AppState;
use adboard_core::calendar::{format_display_date, parse_display_date};
use adboard_core::catalog::is_known_order_status;
use adboard_db::entities::orders;
use adboard_db::repositories::{
    CreateOrderInput, InlineAdvertiserInput, InlineBloggerInput, OrderError, OrderFilter,
    OrderRepository, UpdateOrderInput,
};

/// Selector value meaning "create a new party instead of picking one".
const CREATE_NEW_SENTINEL: i32 = 0;

/// Creates the orders router (requires the auth layer applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Posting date as `dd.mm.yyyy`.
    pub date: Option<String>,
    /// Blogger selector; `0` requests an inline create.
    pub blogger_id: Option<i32>,
    /// Name for the inline blogger.
    pub new_blogger_name: Option<String>,
    /// Platform for the inline blogger.
    pub new_blogger_platform: Option<String>,
    /// Advertiser selector; `0` requests an inline create.
    pub advertiser_id: Option<i32>,
    /// Name for the inline advertiser.
    pub new_advertiser_name: Option<String>,
    /// Telegram handle for the inline advertiser.
    pub new_advertiser_telegram: Option<String>,
    /// Project the order belongs to.
    pub project_id: Option<i32>,
    /// Month bucket, independent of the project.
    pub month_id: Option<i32>,
    /// Advertised product.
    pub product: Option<String>,
    /// What the advertiser pays.
    pub cost: Option<Decimal>,
    /// What the blogger takes.
    pub blogger_fee: Option<Decimal>,
    /// Order status.
    pub status: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Link to the published post.
    pub link: Option<String>,
}

/// Request body for replacing an order.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    /// Posting date as `dd.mm.yyyy`.
    pub date: Option<String>,
    /// Blogger selection.
    pub blogger_id: Option<i32>,
    /// Advertiser selection.
    pub advertiser_id: Option<i32>,
    /// Project the order belongs to.
    pub project_id: Option<i32>,
    /// Month bucket.
    pub month_id: Option<i32>,
    /// Advertised product.
    pub product: Option<String>,
    /// What the advertiser pays.
    pub cost: Option<Decimal>,
    /// What the blogger takes.
    pub blogger_fee: Option<Decimal>,
    /// Order status.
    pub status: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Link to the published post.
    pub link: Option<String>,
}

/// Query filters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Exact match on status.
    pub status: Option<String>,
    /// Exact match on blogger.
    pub blogger_id: Option<i32>,
    /// Exact match on advertiser.
    pub advertiser_id: Option<i32>,
    /// Exact match on project.
    pub project_id: Option<i32>,
    /// Exact match on month bucket.
    pub month_id: Option<i32>,
    /// Substring match on product.
    pub product: Option<String>,
}

/// Response body for an order.
///
/// The posting date comes back in the same `dd.mm.yyyy` shape the form
/// submitted, so an edit screen can redisplay it verbatim.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// Order id.
    pub id: i32,
    /// Posting date as `dd.mm.yyyy`.
    pub date: Option<String>,
    /// Blogger reference; null when unset or the blogger was deleted.
    pub blogger_id: Option<i32>,
    /// Advertiser reference; null when unset or the advertiser was deleted.
    pub advertiser_id: Option<i32>,
    /// Project reference.
    pub project_id: Option<i32>,
    /// Month bucket reference.
    pub month_id: Option<i32>,
    /// Advertised product.
    pub product: Option<String>,
    /// What the advertiser pays.
    pub cost: Decimal,
    /// What the blogger takes.
    pub blogger_fee: Decimal,
    /// Order status.
    pub status: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Link to the published post.
    pub link: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<orders::Model> for OrderResponse {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            date: model.date.map(format_display_date),
            blogger_id: model.blogger_id,
            advertiser_id: model.advertiser_id,
            project_id: model.project_id,
            month_id: model.month_id,
            product: model.product,
            cost: model.cost,
            blogger_fee: model.blogger_fee,
            status: model.status,
            notes: model.notes,
            link: model.link,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Parses an optional `dd.mm.yyyy` form date; blank means no date.
fn parse_form_date(date: Option<&str>) -> Result<Option<NaiveDate>, Response> {
    match date {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_display_date(raw).map(Some).map_err(|_| {
            json_error(
                StatusCode::BAD_REQUEST,
                "invalid_date",
                "Date must be in dd.mm.yyyy format",
            )
        }),
    }
}

/// Validates the status value, defaulting when the form leaves it off.
fn resolve_status(status: Option<String>) -> Result<String, Response> {
    let status = status.unwrap_or_else(|| "negotiation".to_string());
    if !is_known_order_status(&status) {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "unknown_status",
            "Status must be one of: negotiation, agreed, paid, published",
        ));
    }
    Ok(status)
}

/// Splits a blogger selector into (existing id, inline create request).
///
/// The sentinel `0` requests an inline create; the repository skips it when
/// the submitted name is blank, leaving the reference null.
fn resolve_blogger_selector(
    blogger_id: Option<i32>,
    name: Option<String>,
    platform: Option<String>,
) -> (Option<i32>, Option<InlineBloggerInput>) {
    match blogger_id {
        Some(CREATE_NEW_SENTINEL) => (
            None,
            Some(InlineBloggerInput {
                name: name.unwrap_or_default(),
                platform,
            }),
        ),
        other => (other, None),
    }
}

/// Splits an advertiser selector into (existing id, inline create request).
fn resolve_advertiser_selector(
    advertiser_id: Option<i32>,
    name: Option<String>,
    telegram: Option<String>,
) -> (Option<i32>, Option<InlineAdvertiserInput>) {
    match advertiser_id {
        Some(CREATE_NEW_SENTINEL) => (
            None,
            Some(InlineAdvertiserInput {
                name: name.unwrap_or_default(),
                telegram,
            }),
        ),
        other => (other, None),
    }
}

fn map_error(e: &OrderError) -> Response {
    match e {
        OrderError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Order not found")
        }
        OrderError::BloggerNotFound(_)
        | OrderError::AdvertiserNotFound(_)
        | OrderError::ProjectNotFound(_)
        | OrderError::MonthNotFound(_)
        | OrderError::NegativeAmount(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_selection", &e.to_string())
        }
        OrderError::Database(_) => {
            error!(error = %e, "Order operation failed");
            internal_error()
        }
    }
}

/// GET /orders - List orders, latest posting date first.
async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> impl IntoResponse {
    let repo = OrderRepository::new((*state.db).clone());
    let filter = OrderFilter {
        status: query.status,
        blogger_id: query.blogger_id,
        advertiser_id: query.advertiser_id,
        project_id: query.project_id,
        month_id: query.month_id,
        product_contains: query.product,
    };

    match repo.list(&filter).await {
        Ok(items) => {
            let items: Vec<OrderResponse> = items.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// POST /orders - Create an order, optionally inline-creating parties.
async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let date = match parse_form_date(payload.date.as_deref()) {
        Ok(date) => date,
        Err(response) => return response,
    };
    let status = match resolve_status(payload.status) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let (blogger_id, new_blogger) = resolve_blogger_selector(
        payload.blogger_id,
        payload.new_blogger_name,
        payload.new_blogger_platform,
    );
    let (advertiser_id, new_advertiser) = resolve_advertiser_selector(
        payload.advertiser_id,
        payload.new_advertiser_name,
        payload.new_advertiser_telegram,
    );

    let repo = OrderRepository::new((*state.db).clone());
    let input = CreateOrderInput {
        date,
        blogger_id,
        new_blogger,
        advertiser_id,
        new_advertiser,
        project_id: payload.project_id,
        month_id: payload.month_id,
        product: payload.product,
        cost: payload.cost.unwrap_or(Decimal::ZERO),
        blogger_fee: payload.blogger_fee.unwrap_or(Decimal::ZERO),
        status,
        notes: payload.notes,
        link: payload.link,
    };

    match repo.create(input).await {
        Ok(order) => {
            info!(order_id = order.id, "Order created");
            (StatusCode::CREATED, Json(OrderResponse::from(order))).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// GET /orders/{id} - Get an order for display or edit.
async fn get_order(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = OrderRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(order) => (StatusCode::OK, Json(OrderResponse::from(order))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// PUT /orders/{id} - Replace an order's fields.
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> impl IntoResponse {
    let date = match parse_form_date(payload.date.as_deref()) {
        Ok(date) => date,
        Err(response) => return response,
    };
    let status = match resolve_status(payload.status) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let repo = OrderRepository::new((*state.db).clone());
    let input = UpdateOrderInput {
        date: Some(date),
        blogger_id: Some(payload.blogger_id),
        advertiser_id: Some(payload.advertiser_id),
        project_id: Some(payload.project_id),
        month_id: Some(payload.month_id),
        product: Some(payload.product),
        cost: Some(payload.cost.unwrap_or(Decimal::ZERO)),
        blogger_fee: Some(payload.blogger_fee.unwrap_or(Decimal::ZERO)),
        status: Some(status),
        notes: Some(payload.notes),
        link: Some(payload.link),
    };

    match repo.update(id, input).await {
        Ok(order) => (StatusCode::OK, Json(OrderResponse::from(order))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// DELETE /orders/{id} - Delete an order.
async fn delete_order(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = OrderRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(order_id = id, "Order deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(7))]
    #[case(None)]
    fn test_resolve_blogger_selector_passthrough(#[case] selector: Option<i32>) {
        let (id, inline) = resolve_blogger_selector(selector, None, None);
        assert_eq!(id, selector);
        assert!(inline.is_none());
    }

    #[test]
    fn test_resolve_blogger_selector_sentinel() {
        let (id, inline) = resolve_blogger_selector(
            Some(0),
            Some("Anna".to_string()),
            Some("tg".to_string()),
        );
        assert_eq!(id, None);
        let inline = inline.expect("inline request present");
        assert_eq!(inline.name, "Anna");
        assert_eq!(inline.platform.as_deref(), Some("tg"));
    }

    #[test]
    fn test_resolve_blogger_selector_sentinel_without_name() {
        // A blank inline name still produces a request; the repository
        // skips it and leaves the reference null.
        let (id, inline) = resolve_blogger_selector(Some(0), None, None);
        assert_eq!(id, None);
        assert_eq!(inline.expect("inline request present").name, "");
    }

    #[test]
    fn test_parse_form_date() {
        assert!(parse_form_date(None).expect("ok").is_none());
        assert!(parse_form_date(Some("")).expect("ok").is_none());
        assert_eq!(
            parse_form_date(Some("15.01.2024")).expect("ok"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert!(parse_form_date(Some("2024-01-15")).is_err());
    }

    #[rstest]
    #[case("negotiation")]
    #[case("agreed")]
    #[case("paid")]
    #[case("published")]
    fn test_resolve_status_accepts(#[case] status: &str) {
        assert_eq!(
            resolve_status(Some(status.to_string())).expect("valid"),
            status
        );
    }

    #[test]
    fn test_resolve_status_defaults_and_rejects() {
        assert_eq!(resolve_status(None).expect("default"), "negotiation");
        assert!(resolve_status(Some("planned".to_string())).is_err());
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
    use crate::AppState;

    async fn app() -> (Router, AppState) {
        let state = test_state().await;
        let router = Router::new()
            .merge(super::routes())
            .with_state(state.clone());
        (router, state)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request builds")
    }

    #[tokio::test]
    async fn test_create_order_round_trips_display_date() {
        let (app, _state) = app().await;

        let created = app
            .clone()
            .oneshot(post_json(
                "/orders",
                r#"{"date":"15.01.2024","cost":"100","blogger_fee":"20"}"#.to_string(),
            ))
            .await
            .expect("request succeeds");
        assert_eq!(created.status(), StatusCode::CREATED);

        let body = created.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        let id = json["id"].as_i64().expect("id");
        assert_eq!(json["date"], "15.01.2024");

        let reread = app
            .oneshot(
                Request::builder()
                    .uri(format!("/orders/{id}"))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");
        let body = reread.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        assert_eq!(json["date"], "15.01.2024");
    }

    #[tokio::test]
    async fn test_create_order_with_bad_date_persists_nothing() {
        let (app, _state) = app().await;

        let created = app
            .clone()
            .oneshot(post_json(
                "/orders",
                r#"{"date":"01/15/2024"}"#.to_string(),
            ))
            .await
            .expect("request succeeds");
        assert_eq!(created.status(), StatusCode::BAD_REQUEST);

        let listed = app
            .oneshot(
                Request::builder()
                    .uri("/orders")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");
        let body = listed.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        assert!(json.as_array().expect("array").is_empty());
    }

    #[tokio::test]
    async fn test_new_blogger_sentinel_with_blank_name_leaves_null() {
        let (app, _state) = app().await;

        let created = app
            .oneshot(post_json(
                "/orders",
                r#"{"blogger_id":0,"new_blogger_name":"  "}"#.to_string(),
            ))
            .await
            .expect("request succeeds");
        assert_eq!(created.status(), StatusCode::CREATED);

        let body = created.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        assert!(json["blogger_id"].is_null());
    }
}
