//! Month repository for database operations.
//!
//! Months bucket projects and the orders that are not attached to any
//! project.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{months, orders, projects};

/// Error types for month operations.
#[derive(Debug, thiserror::Error)]
pub enum MonthError {
    /// Month not found.
    #[error("Month not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a month.
#[derive(Debug, Clone)]
pub struct CreateMonthInput {
    /// Month label, e.g. "March 2025".
    pub name: Option<String>,
}

/// Input for updating a month.
#[derive(Debug, Clone, Default)]
pub struct UpdateMonthInput {
    /// Month label.
    pub name: Option<Option<String>>,
}

/// A month with its projects and its direct (project-less) orders.
#[derive(Debug, Clone)]
pub struct MonthDetail {
    /// The month record.
    pub month: months::Model,
    /// Projects grouped under the month.
    pub projects: Vec<projects::Model>,
    /// Orders attached to the month directly, without a project.
    pub orders: Vec<orders::Model>,
}

/// Month repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct MonthRepository {
    db: DatabaseConnection,
}

impl MonthRepository {
    /// Creates a new month repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateMonthInput) -> Result<months::Model, MonthError> {
        let model = months::ActiveModel {
            name: Set(input.name),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Finds a month by id.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: i32) -> Result<months::Model, MonthError> {
        months::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(MonthError::NotFound(id))
    }

    /// Loads a month together with its projects and direct orders.
    ///
    /// Direct orders are those with `month_id` set and no project; orders
    /// that belong to a project are scoped to that project's month instead.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::NotFound` if no row matches.
    pub async fn find_detail(&self, id: i32) -> Result<MonthDetail, MonthError> {
        let month = self.find_by_id(id).await?;

        let month_projects = projects::Entity::find()
            .filter(projects::Column::MonthId.eq(id))
            .order_by_desc(projects::Column::Id)
            .all(&self.db)
            .await?;

        let direct_orders = orders::Entity::find()
            .filter(orders::Column::MonthId.eq(id))
            .filter(orders::Column::ProjectId.is_null())
            .order_by_asc(orders::Column::Date)
            .all(&self.db)
            .await?;

        Ok(MonthDetail {
            month,
            projects: month_projects,
            orders: direct_orders,
        })
    }

    /// Lists months, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<months::Model>, MonthError> {
        Ok(months::Entity::find()
            .order_by_desc(months::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Updates a month.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::NotFound` if no row matches.
    pub async fn update(&self, id: i32, input: UpdateMonthInput) -> Result<months::Model, MonthError> {
        let existing = self.find_by_id(id).await?;
        let mut model: months::ActiveModel = existing.into();

        if let Some(name) = input.name {
            model.name = Set(name);
        }

        Ok(model.update(&self.db).await?)
    }

    /// Deletes a month.
    ///
    /// Projects and orders bucketed under the month are detached, not
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::NotFound` if no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), MonthError> {
        let result = months::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(MonthError::NotFound(id));
        }
        Ok(())
    }
}
