//! Integration tests for the stats repository.

mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};

use adboard_db::entities::projects;
use adboard_db::repositories::{
    CreateOrderInput, CreateProjectInput, OrderRepository, ProjectRepository, StatsRepository,
};

fn order_input(date: Option<NaiveDate>, cost: Decimal, fee: Decimal) -> CreateOrderInput {
    CreateOrderInput {
        date,
        blogger_id: None,
        new_blogger: None,
        advertiser_id: None,
        new_advertiser: None,
        project_id: None,
        month_id: None,
        product: None,
        cost,
        blogger_fee: fee,
        status: "negotiation".to_string(),
        notes: None,
        link: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_stats_on_empty_store_are_all_zero() {
    let db = common::setup_db().await;
    let stats = StatsRepository::new(db)
        .calculate_stats()
        .await
        .expect("stats on empty store");

    assert_eq!(stats.total_orders, 0);
    assert_eq!(stats.revenue, dec!(0));
    assert_eq!(stats.paid_out, dec!(0));
    assert_eq!(stats.profit, dec!(0));
    assert_eq!(stats.total_projects, 0);
}

#[tokio::test]
async fn test_stats_sum_costs_and_fees() {
    let db = common::setup_db().await;
    let orders = OrderRepository::new(db.clone());

    orders
        .create(order_input(None, dec!(100), dec!(20)))
        .await
        .expect("create order");
    orders
        .create(order_input(None, dec!(50), dec!(50)))
        .await
        .expect("create order");

    let stats = StatsRepository::new(db)
        .calculate_stats()
        .await
        .expect("stats");

    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.revenue, dec!(150));
    assert_eq!(stats.paid_out, dec!(70));
    assert_eq!(stats.profit, dec!(80));
}

#[tokio::test]
async fn test_stats_count_projects_regardless_of_status() {
    let db = common::setup_db().await;
    let projects_repo = ProjectRepository::new(db.clone());

    let active = projects_repo
        .create(CreateProjectInput {
            name: "Spring push".to_string(),
            month_id: None,
            advertiser_id: None,
            description: None,
        })
        .await
        .expect("create project");
    let finished = projects_repo
        .create(CreateProjectInput {
            name: "Winter wrap".to_string(),
            month_id: None,
            advertiser_id: None,
            description: None,
        })
        .await
        .expect("create project");

    // Flip one project's stored status; the rollup must still count it.
    let mut model: projects::ActiveModel = finished.into();
    model.status = Set("finished".to_string());
    model.update(&db).await.expect("update status");

    let stats = StatsRepository::new(db)
        .calculate_stats()
        .await
        .expect("stats");

    assert_eq!(stats.total_projects, 2);
    assert_eq!(active.status, "active");
}

#[tokio::test]
async fn test_upcoming_exits_window_and_order() {
    let db = common::setup_db().await;
    let orders = OrderRepository::new(db.clone());

    for day in [5, 15, 28, 29, 30] {
        orders
            .create(order_input(Some(date(2024, 4, day)), dec!(10), dec!(1)))
            .await
            .expect("create order");
    }
    // Next month and undated orders never match.
    orders
        .create(order_input(Some(date(2024, 5, 2)), dec!(10), dec!(1)))
        .await
        .expect("create order");
    orders
        .create(order_input(None, dec!(10), dec!(1)))
        .await
        .expect("create order");

    let stats = StatsRepository::new(db);
    let today = date(2024, 4, 12);

    let upcoming = stats
        .upcoming_exits(today, None)
        .await
        .expect("upcoming exits");
    let days: Vec<u32> = upcoming
        .iter()
        .map(|o| chrono::Datelike::day(&o.date.expect("dated")))
        .collect();
    assert_eq!(days, vec![15, 28]);
}

#[tokio::test]
async fn test_upcoming_exits_day_30_clamps_to_28() {
    let db = common::setup_db().await;
    let orders = OrderRepository::new(db.clone());

    for day in [27, 28, 29, 30] {
        orders
            .create(order_input(Some(date(2024, 4, day)), dec!(10), dec!(1)))
            .await
            .expect("create order");
    }

    let upcoming = StatsRepository::new(db)
        .upcoming_exits(date(2024, 4, 12), Some(30))
        .await
        .expect("upcoming exits");

    // Window degenerates to day 28; days 29 and 30 of a 30-day month stay
    // out.
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].date, Some(date(2024, 4, 28)));
}

#[tokio::test]
async fn test_upcoming_exits_caps_at_ten() {
    let db = common::setup_db().await;
    let orders = OrderRepository::new(db.clone());

    for _ in 0..12 {
        orders
            .create(order_input(Some(date(2024, 4, 20)), dec!(10), dec!(1)))
            .await
            .expect("create order");
    }

    let upcoming = StatsRepository::new(db)
        .upcoming_exits(date(2024, 4, 1), None)
        .await
        .expect("upcoming exits");

    assert_eq!(upcoming.len(), 10);
}
