//! Stats repository for dashboard rollups.
//!
//! All aggregates over empty sets come back as zero, never null and never an
//! error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use adboard_core::calendar::exit_window;

use crate::entities::{orders, projects};

/// Maximum number of orders the upcoming-exits query returns.
const UPCOMING_LIMIT: u64 = 10;

/// Error types for stats operations.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Global rollup across all orders and projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    /// Total number of orders.
    pub total_orders: u64,
    /// Sum of `cost` across all orders.
    pub revenue: Decimal,
    /// Sum of `blogger_fee` across all orders.
    pub paid_out: Decimal,
    /// `revenue - paid_out`.
    pub profit: Decimal,
    /// Total number of projects, regardless of status.
    pub total_projects: u64,
}

/// Stats repository for read-only derived views.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    db: DatabaseConnection,
}

impl StatsRepository {
    /// Creates a new stats repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the global, unfiltered rollup.
    ///
    /// Every project counts, whatever its stored status says.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn calculate_stats(&self) -> Result<StatsSummary, StatsError> {
        let all_orders = orders::Entity::find().all(&self.db).await?;

        let total_orders = u64::try_from(all_orders.len()).unwrap_or(u64::MAX);
        let revenue: Decimal = all_orders.iter().map(|o| o.cost).sum();
        let paid_out: Decimal = all_orders.iter().map(|o| o.blogger_fee).sum();
        let profit = revenue - paid_out;

        let total_projects = projects::Entity::find().count(&self.db).await?;

        Ok(StatsSummary {
            total_orders,
            revenue,
            paid_out,
            profit,
            total_projects,
        })
    }

    /// Returns up to ten orders posting in the remainder of the current
    /// month, earliest first.
    ///
    /// `today` anchors the month; `day` overrides today's day-of-month as
    /// the window start. The window never reaches past day 28.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn upcoming_exits(
        &self,
        today: NaiveDate,
        day: Option<u32>,
    ) -> Result<Vec<orders::Model>, StatsError> {
        let (start, end) = exit_window(today, day);

        Ok(orders::Entity::find()
            .filter(orders::Column::Date.gte(start))
            .filter(orders::Column::Date.lte(end))
            .order_by_asc(orders::Column::Date)
            .limit(UPCOMING_LIMIT)
            .all(&self.db)
            .await?)
    }
}
