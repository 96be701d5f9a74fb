//! Project repository for database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use adboard_core::money::project_profit;

use crate::entities::{orders, projects};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name (required).
    pub name: String,
    /// Month the project is grouped under.
    pub month_id: Option<i32>,
    /// Advertiser the project runs for.
    pub advertiser_id: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Input for updating a project.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// Project name.
    pub name: Option<String>,
    /// Month the project is grouped under.
    pub month_id: Option<Option<i32>>,
    /// Advertiser the project runs for.
    pub advertiser_id: Option<Option<i32>>,
    /// Free-text description.
    pub description: Option<Option<String>>,
}

/// Filter options for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring match on name.
    pub name_contains: Option<String>,
    /// Exact match on owning month.
    pub month_id: Option<i32>,
    /// Exact match on advertiser.
    pub advertiser_id: Option<i32>,
}

/// A project with its orders and derived profit.
#[derive(Debug, Clone)]
pub struct ProjectWithOrders {
    /// The project record.
    pub project: projects::Model,
    /// The project's orders, earliest posting date first.
    pub orders: Vec<orders::Model>,
    /// Sum of `cost - blogger_fee` over the orders; zero when there are none.
    pub profit: Decimal,
}

/// Project repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new project.
    ///
    /// The `status` column keeps its storage default; it is not exposed on
    /// the create path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateProjectInput) -> Result<projects::Model, ProjectError> {
        let model = projects::ActiveModel {
            name: Set(input.name),
            month_id: Set(input.month_id),
            advertiser_id: Set(input.advertiser_id),
            description: Set(input.description),
            status: Set("active".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Finds a project by id.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: i32) -> Result<projects::Model, ProjectError> {
        projects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// Loads a project together with its orders and derived profit.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if no row matches.
    pub async fn find_with_orders(&self, id: i32) -> Result<ProjectWithOrders, ProjectError> {
        let project = self.find_by_id(id).await?;

        let project_orders = orders::Entity::find()
            .filter(orders::Column::ProjectId.eq(id))
            .order_by_asc(orders::Column::Date)
            .all(&self.db)
            .await?;

        let profit = project_profit(project_orders.iter().map(|o| (o.cost, o.blogger_fee)));

        Ok(ProjectWithOrders {
            project,
            orders: project_orders,
            profit,
        })
    }

    /// Computes a project's derived profit without loading the full detail.
    ///
    /// A project with zero orders reports zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn profit(&self, id: i32) -> Result<Decimal, ProjectError> {
        let project_orders = orders::Entity::find()
            .filter(orders::Column::ProjectId.eq(id))
            .all(&self.db)
            .await?;

        Ok(project_profit(
            project_orders.iter().map(|o| (o.cost, o.blogger_fee)),
        ))
    }

    /// Lists projects, newest first, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &ProjectFilter) -> Result<Vec<projects::Model>, ProjectError> {
        let mut query = projects::Entity::find();

        if let Some(name) = &filter.name_contains {
            query = query.filter(projects::Column::Name.contains(name));
        }
        if let Some(month_id) = filter.month_id {
            query = query.filter(projects::Column::MonthId.eq(month_id));
        }
        if let Some(advertiser_id) = filter.advertiser_id {
            query = query.filter(projects::Column::AdvertiserId.eq(advertiser_id));
        }

        Ok(query
            .order_by_desc(projects::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Updates a project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if no row matches.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateProjectInput,
    ) -> Result<projects::Model, ProjectError> {
        let existing = self.find_by_id(id).await?;
        let mut model: projects::ActiveModel = existing.into();

        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(month_id) = input.month_id {
            model.month_id = Set(month_id);
        }
        if let Some(advertiser_id) = input.advertiser_id {
            model.advertiser_id = Set(advertiser_id);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }

        Ok(model.update(&self.db).await?)
    }

    /// Deletes a project.
    ///
    /// The project's orders and documents go with it (cascade).
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), ProjectError> {
        let result = projects::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ProjectError::NotFound(id));
        }
        Ok(())
    }
}
