//! Dashboard routes: the global rollup and upcoming posting dates.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::routes::{internal_error, orders::OrderResponse};
use crate::AppState;
use adboard_db::repositories::{StatsRepository, StatsSummary};

/// Creates the dashboard router (requires the auth layer applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Day-of-month the upcoming window starts at; defaults to today.
    pub day: Option<u32>,
}

/// Stats block of the dashboard response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Total number of orders.
    pub total_orders: u64,
    /// Sum of `cost` across all orders.
    pub revenue: Decimal,
    /// Sum of `blogger_fee` across all orders.
    pub paid_out: Decimal,
    /// `revenue - paid_out`.
    pub profit: Decimal,
    /// Total number of projects.
    pub total_projects: u64,
}

impl From<StatsSummary> for StatsResponse {
    fn from(summary: StatsSummary) -> Self {
        Self {
            total_orders: summary.total_orders,
            revenue: summary.revenue,
            paid_out: summary.paid_out,
            profit: summary.profit,
            total_projects: summary.total_projects,
        }
    }
}

/// Dashboard response: rollup plus upcoming posting dates.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Global rollup.
    pub stats: StatsResponse,
    /// Up to ten orders posting in the rest of the current month.
    pub upcoming: Vec<OrderResponse>,
}

/// GET /dashboard - Stats summary and upcoming exits.
async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let repo = StatsRepository::new((*state.db).clone());

    let stats = match repo.calculate_stats().await {
        Ok(stats) => stats,
        Err(e) => {
            error!(error = %e, "Failed to compute stats");
            return internal_error();
        }
    };

    let today = Utc::now().date_naive();
    let upcoming = match repo.upcoming_exits(today, query.day).await {
        Ok(upcoming) => upcoming,
        Err(e) => {
            error!(error = %e, "Failed to load upcoming exits");
            return internal_error();
        }
    };

    let response = DashboardResponse {
        stats: StatsResponse::from(stats),
        upcoming: upcoming.into_iter().map(Into::into).collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod integration_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::test_state;

    async fn app() -> Router {
        let state = test_state().await;
        Router::new().merge(super::routes()).with_state(state)
    }

    #[tokio::test]
    async fn test_dashboard_on_empty_store_is_all_zero() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");

        assert_eq!(json["stats"]["total_orders"], 0);
        assert_eq!(json["stats"]["revenue"], "0");
        assert_eq!(json["stats"]["paid_out"], "0");
        assert_eq!(json["stats"]["profit"], "0");
        assert_eq!(json["stats"]["total_projects"], 0);
        assert!(json["upcoming"].as_array().expect("array").is_empty());
    }
}
