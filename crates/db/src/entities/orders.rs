//! `SeaORM` Entity for the orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Option<Date>,
    pub blogger_id: Option<i32>,
    pub advertiser_id: Option<i32>,
    pub project_id: Option<i32>,
    pub month_id: Option<i32>,
    pub product: Option<String>,
    pub cost: Decimal,
    pub blogger_fee: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub link: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bloggers::Entity",
        from = "Column::BloggerId",
        to = "super::bloggers::Column::Id"
    )]
    Bloggers,
    #[sea_orm(
        belongs_to = "super::advertisers::Entity",
        from = "Column::AdvertiserId",
        to = "super::advertisers::Column::Id"
    )]
    Advertisers,
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
    #[sea_orm(
        belongs_to = "super::months::Entity",
        from = "Column::MonthId",
        to = "super::months::Column::Id"
    )]
    Months,
    #[sea_orm(has_many = "super::documents::Entity")]
    Documents,
}

impl Related<super::bloggers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bloggers.def()
    }
}

impl Related<super::advertisers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advertisers.def()
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::months::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Months.def()
    }
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
