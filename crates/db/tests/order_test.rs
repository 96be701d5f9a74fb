//! Integration tests for the order repository.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use adboard_db::entities::{advertisers, bloggers};
use adboard_db::repositories::{
    CreateBloggerInput, CreateOrderInput, InlineAdvertiserInput, InlineBloggerInput,
    OrderError, OrderRepository, UpdateOrderInput,
};
use adboard_db::BloggerRepository;

fn base_input() -> CreateOrderInput {
    CreateOrderInput {
        date: None,
        blogger_id: None,
        new_blogger: None,
        advertiser_id: None,
        new_advertiser: None,
        project_id: None,
        month_id: None,
        product: Some("integration".to_string()),
        cost: dec!(100),
        blogger_fee: dec!(20),
        status: "negotiation".to_string(),
        notes: None,
        link: None,
    }
}

#[tokio::test]
async fn test_create_order_with_inline_parties() {
    let db = common::setup_db().await;
    let repo = OrderRepository::new(db.clone());

    let order = repo
        .create(CreateOrderInput {
            new_blogger: Some(InlineBloggerInput {
                name: "Anna".to_string(),
                platform: Some("tg".to_string()),
            }),
            new_advertiser: Some(InlineAdvertiserInput {
                name: "GadgetCo".to_string(),
                telegram: None,
            }),
            ..base_input()
        })
        .await
        .expect("create order with inline parties");

    let blogger = bloggers::Entity::find_by_id(order.blogger_id.expect("blogger set"))
        .one(&db)
        .await
        .expect("query blogger")
        .expect("blogger row exists");
    assert_eq!(blogger.name, "Anna");
    assert_eq!(blogger.platform.as_deref(), Some("tg"));

    let advertiser =
        advertisers::Entity::find_by_id(order.advertiser_id.expect("advertiser set"))
            .one(&db)
            .await
            .expect("query advertiser")
            .expect("advertiser row exists");
    assert_eq!(advertiser.name, "GadgetCo");
}

#[tokio::test]
async fn test_inline_blogger_with_blank_name_is_skipped() {
    let db = common::setup_db().await;
    let repo = OrderRepository::new(db.clone());

    let order = repo
        .create(CreateOrderInput {
            new_blogger: Some(InlineBloggerInput {
                name: "   ".to_string(),
                platform: Some("insta".to_string()),
            }),
            ..base_input()
        })
        .await
        .expect("create order with blank inline name");

    assert_eq!(order.blogger_id, None);
    let blogger_count = bloggers::Entity::find()
        .count(&db)
        .await
        .expect("count bloggers");
    assert_eq!(blogger_count, 0);
}

#[tokio::test]
async fn test_failed_order_write_rolls_back_inline_create() {
    let db = common::setup_db().await;
    let repo = OrderRepository::new(db.clone());

    let err = repo
        .create(CreateOrderInput {
            new_blogger: Some(InlineBloggerInput {
                name: "Anna".to_string(),
                platform: None,
            }),
            project_id: Some(999),
            ..base_input()
        })
        .await
        .expect_err("missing project must fail the create");
    assert!(matches!(err, OrderError::ProjectNotFound(999)));

    // The inline blogger from the same request must not have survived.
    let blogger_count = bloggers::Entity::find()
        .count(&db)
        .await
        .expect("count bloggers");
    assert_eq!(blogger_count, 0);
}

#[tokio::test]
async fn test_create_order_with_existing_blogger() {
    let db = common::setup_db().await;
    let blogger = BloggerRepository::new(db.clone())
        .create(CreateBloggerInput {
            name: "Boris".to_string(),
            platform: Some("youtube".to_string()),
            link: None,
            contact_link: None,
            rkn_info: None,
            telegram: None,
        })
        .await
        .expect("create blogger");

    let order = OrderRepository::new(db)
        .create(CreateOrderInput {
            blogger_id: Some(blogger.id),
            ..base_input()
        })
        .await
        .expect("create order");

    assert_eq!(order.blogger_id, Some(blogger.id));
}

#[tokio::test]
async fn test_create_order_with_unknown_blogger_fails() {
    let db = common::setup_db().await;
    let err = OrderRepository::new(db)
        .create(CreateOrderInput {
            blogger_id: Some(42),
            ..base_input()
        })
        .await
        .expect_err("unknown blogger must fail");
    assert!(matches!(err, OrderError::BloggerNotFound(42)));
}

#[tokio::test]
async fn test_negative_cost_is_rejected() {
    let db = common::setup_db().await;
    let err = OrderRepository::new(db.clone())
        .create(CreateOrderInput {
            cost: dec!(-1),
            ..base_input()
        })
        .await
        .expect_err("negative cost must fail");
    assert!(matches!(err, OrderError::NegativeAmount("cost")));

    let err = OrderRepository::new(db)
        .create(CreateOrderInput {
            blogger_fee: dec!(-5),
            ..base_input()
        })
        .await
        .expect_err("negative fee must fail");
    assert!(matches!(err, OrderError::NegativeAmount("blogger_fee")));
}

#[tokio::test]
async fn test_date_round_trip() {
    let db = common::setup_db().await;
    let repo = OrderRepository::new(db);

    let posted = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
    let order = repo
        .create(CreateOrderInput {
            date: Some(posted),
            ..base_input()
        })
        .await
        .expect("create order");

    let reread = repo.find_by_id(order.id).await.expect("reread order");
    assert_eq!(reread.date, Some(posted));
}

#[tokio::test]
async fn test_update_and_detach_fields() {
    let db = common::setup_db().await;
    let repo = OrderRepository::new(db);

    let order = repo.create(base_input()).await.expect("create order");

    let updated = repo
        .update(
            order.id,
            UpdateOrderInput {
                cost: Some(dec!(200)),
                status: Some("paid".to_string()),
                product: Some(None),
                ..UpdateOrderInput::default()
            },
        )
        .await
        .expect("update order");

    assert_eq!(updated.cost, dec!(200));
    assert_eq!(updated.status, "paid");
    assert_eq!(updated.product, None);
}

#[tokio::test]
async fn test_find_missing_order_is_not_found() {
    let db = common::setup_db().await;
    let err = OrderRepository::new(db)
        .find_by_id(7)
        .await
        .expect_err("missing order");
    assert!(matches!(err, OrderError::NotFound(7)));
}
