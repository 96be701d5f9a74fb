//! Integration tests for the blogger repository.

mod common;

use rust_decimal_macros::dec;

use adboard_db::repositories::{
    BloggerError, BloggerFilter, BloggerRepository, CreateBloggerInput, CreateOrderInput,
    OrderRepository, UpdateBloggerInput,
};

fn blogger_input(name: &str, platform: Option<&str>) -> CreateBloggerInput {
    CreateBloggerInput {
        name: name.to_string(),
        platform: platform.map(String::from),
        link: None,
        contact_link: None,
        rkn_info: None,
        telegram: None,
    }
}

#[tokio::test]
async fn test_delete_blogger_detaches_orders() {
    let db = common::setup_db().await;
    let bloggers = BloggerRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let blogger = bloggers
        .create(blogger_input("Anna", Some("tg")))
        .await
        .expect("create blogger");

    let order = orders
        .create(CreateOrderInput {
            date: None,
            blogger_id: Some(blogger.id),
            new_blogger: None,
            advertiser_id: None,
            new_advertiser: None,
            project_id: None,
            month_id: None,
            product: None,
            cost: dec!(100),
            blogger_fee: dec!(20),
            status: "agreed".to_string(),
            notes: None,
            link: None,
        })
        .await
        .expect("create order");

    bloggers.delete(blogger.id).await.expect("delete blogger");

    // The order survives with an unresolved blogger reference.
    let reread = orders.find_by_id(order.id).await.expect("order survives");
    assert_eq!(reread.blogger_id, None);
    assert_eq!(reread.cost, dec!(100));
}

#[tokio::test]
async fn test_list_filters_by_name_and_platform() {
    let db = common::setup_db().await;
    let repo = BloggerRepository::new(db);

    repo.create(blogger_input("Anna Tech", Some("tg")))
        .await
        .expect("create");
    repo.create(blogger_input("Boris", Some("youtube")))
        .await
        .expect("create");
    repo.create(blogger_input("annabelle", Some("insta")))
        .await
        .expect("create");

    let by_name = repo
        .list(&BloggerFilter {
            name_contains: Some("anna".to_string()),
            platform: None,
        })
        .await
        .expect("list by name");
    assert_eq!(by_name.len(), 2);

    let by_platform = repo
        .list(&BloggerFilter {
            name_contains: None,
            platform: Some("youtube".to_string()),
        })
        .await
        .expect("list by platform");
    assert_eq!(by_platform.len(), 1);
    assert_eq!(by_platform[0].name, "Boris");
}

#[tokio::test]
async fn test_duplicate_names_are_storable() {
    let db = common::setup_db().await;
    let repo = BloggerRepository::new(db);

    repo.create(blogger_input("Anna", Some("tg")))
        .await
        .expect("first Anna");
    repo.create(blogger_input("Anna", Some("insta")))
        .await
        .expect("second Anna stores fine");

    let all = repo
        .list(&BloggerFilter::default())
        .await
        .expect("list all");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_update_blogger() {
    let db = common::setup_db().await;
    let repo = BloggerRepository::new(db);

    let blogger = repo
        .create(blogger_input("Anna", Some("tg")))
        .await
        .expect("create");

    let updated = repo
        .update(
            blogger.id,
            UpdateBloggerInput {
                name: Some("Anna Tech".to_string()),
                telegram: Some(Some("@annatech".to_string())),
                ..UpdateBloggerInput::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.name, "Anna Tech");
    assert_eq!(updated.telegram.as_deref(), Some("@annatech"));
    assert_eq!(updated.platform.as_deref(), Some("tg"));
}

#[tokio::test]
async fn test_find_missing_blogger_is_not_found() {
    let db = common::setup_db().await;
    let err = BloggerRepository::new(db)
        .find_by_id(99)
        .await
        .expect_err("missing blogger");
    assert!(matches!(err, BloggerError::NotFound(99)));
}
