//! Integration tests for the project repository.

mod common;

use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use adboard_db::entities::{documents, orders};
use adboard_db::repositories::{
    CreateDocumentInput, CreateOrderInput, CreateProjectInput, DocumentRepository,
    OrderRepository, ProjectError, ProjectRepository,
};

async fn create_project(db: &sea_orm::DatabaseConnection, name: &str) -> i32 {
    ProjectRepository::new(db.clone())
        .create(CreateProjectInput {
            name: name.to_string(),
            month_id: None,
            advertiser_id: None,
            description: None,
        })
        .await
        .expect("create project")
        .id
}

async fn create_order(
    db: &sea_orm::DatabaseConnection,
    project_id: i32,
    cost: rust_decimal::Decimal,
    fee: rust_decimal::Decimal,
) {
    OrderRepository::new(db.clone())
        .create(CreateOrderInput {
            date: None,
            blogger_id: None,
            new_blogger: None,
            advertiser_id: None,
            new_advertiser: None,
            project_id: Some(project_id),
            month_id: None,
            product: None,
            cost,
            blogger_fee: fee,
            status: "agreed".to_string(),
            notes: None,
            link: None,
        })
        .await
        .expect("create order");
}

#[tokio::test]
async fn test_project_profit_is_additive() {
    let db = common::setup_db().await;
    let project_id = create_project(&db, "Spring push").await;

    create_order(&db, project_id, dec!(100), dec!(20)).await;
    create_order(&db, project_id, dec!(50), dec!(50)).await;

    let detail = ProjectRepository::new(db)
        .find_with_orders(project_id)
        .await
        .expect("load project detail");

    assert_eq!(detail.orders.len(), 2);
    assert_eq!(detail.profit, dec!(80));
}

#[tokio::test]
async fn test_project_with_no_orders_has_zero_profit() {
    let db = common::setup_db().await;
    let project_id = create_project(&db, "Empty").await;

    let profit = ProjectRepository::new(db)
        .profit(project_id)
        .await
        .expect("profit of empty project");
    assert_eq!(profit, dec!(0));
}

#[tokio::test]
async fn test_delete_project_cascades_orders_and_documents() {
    let db = common::setup_db().await;
    let repo = ProjectRepository::new(db.clone());
    let project_id = create_project(&db, "Doomed").await;

    create_order(&db, project_id, dec!(10), dec!(1)).await;
    DocumentRepository::new(db.clone())
        .create(CreateDocumentInput {
            name: "Brief".to_string(),
            filename: "brief.pdf".to_string(),
            file_type: None,
            project_id: Some(project_id),
            order_id: None,
            description: None,
        })
        .await
        .expect("create document");

    repo.delete(project_id).await.expect("delete project");

    assert_eq!(
        orders::Entity::find().count(&db).await.expect("count"),
        0,
        "project orders must cascade"
    );
    assert_eq!(
        documents::Entity::find().count(&db).await.expect("count"),
        0,
        "project documents must cascade"
    );
}

#[tokio::test]
async fn test_delete_missing_project_is_not_found() {
    let db = common::setup_db().await;
    let err = ProjectRepository::new(db)
        .delete(13)
        .await
        .expect_err("missing project");
    assert!(matches!(err, ProjectError::NotFound(13)));
}

#[tokio::test]
async fn test_new_project_defaults_to_active_status() {
    let db = common::setup_db().await;
    let project = ProjectRepository::new(db)
        .create(CreateProjectInput {
            name: "Fresh".to_string(),
            month_id: None,
            advertiser_id: None,
            description: Some("notes".to_string()),
        })
        .await
        .expect("create project");

    assert_eq!(project.status, "active");
}
