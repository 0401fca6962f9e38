// tests/reporting_tests.rs
mod common;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use common::*;
use tayarpro::errors::AppError;
use tayarpro::models::{Account, Order, PaymentMethod};
use tayarpro::services::{cart_service, order_service, reporting};
use tayarpro::store::ShopStore;
use uuid::Uuid;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn order_at(shop: &Shop, total_price: i64, created_at: DateTime<Utc>) -> Order {
  Order {
    id: Uuid::new_v4(),
    account_id: shop.customer.account_id,
    total_price,
    payment_method: PaymentMethod::Cash,
    appointment_id: None,
    created_at,
  }
}

#[tokio::test]
async fn test_empty_months_report_zero() {
  let shop = shop().await;
  let today = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();

  let buckets = reporting::sales_and_orders(&shop.state, &shop.admin, today).await.unwrap();

  assert_eq!(buckets.len(), 7);
  assert!(buckets.iter().all(|b| b.total_sales == 0 && b.order_count == 0));
  assert_eq!(buckets.first().map(|b| (b.year, b.month)), Some((2019, 7)));
  assert_eq!(buckets.last().map(|b| b.label.as_str()), Some("January"));
}

#[tokio::test]
async fn test_current_month_bucket_counts_checkout() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, TYRE_ID, 2).await.unwrap();
  cart_service::add_item(&shop.state, &shop.customer, SERVICE_ID, 1).await.unwrap();
  order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();
  let today = Utc::now().date_naive();

  let buckets = reporting::sales_and_orders(&shop.state, &shop.admin, today).await.unwrap();
  let current = buckets.last().unwrap();
  assert_eq!((current.year, current.month), (today.year(), today.month()));
  assert_eq!(current.total_sales, 250);
  assert_eq!(current.order_count, 1);
  assert!(buckets[..6].iter().all(|b| b.order_count == 0));

  let stats = reporting::order_statistics(&shop.state, &shop.admin, today).await.unwrap();
  assert_eq!(stats.iter().map(|c| c.count).collect::<Vec<_>>(), vec![0, 0, 0, 0, 0, 0, 1]);

  let users = reporting::registered_users(&shop.state, &shop.admin, today).await.unwrap();
  assert_eq!(users.last().unwrap().count, 3);

  let dashboard = reporting::dashboard(&shop.state, &shop.admin, today).await.unwrap();
  assert_eq!(dashboard.month_now, today.month());
  assert_eq!(dashboard.total_revenue, 250);
  assert_eq!(dashboard.num_orders, 1);
  assert_eq!(dashboard.this_month_users, 3);
  assert_eq!(dashboard.previous_total_revenue, 0);
  assert_eq!(dashboard.previous_month_users, 0);
}

#[tokio::test]
async fn test_dashboard_in_january_looks_back_to_december() {
  let shop = shop().await;
  let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

  let dashboard = reporting::dashboard(&shop.state, &shop.admin, today).await.unwrap();

  assert_eq!(dashboard.month_now, 1);
  assert_eq!(dashboard.previous_month, 12);
}

#[tokio::test]
async fn test_reports_require_admin() {
  let shop = shop().await;
  let today = Utc::now().date_naive();

  assert!(matches!(
    reporting::sales_and_orders(&shop.state, &shop.customer, today).await,
    Err(AppError::Unauthorized(_))
  ));
  assert!(matches!(
    reporting::dashboard(&shop.state, &shop.customer, today).await,
    Err(AppError::Unauthorized(_))
  ));
}

#[tokio::test]
async fn test_backdated_rows_land_in_their_month_across_new_year() {
  let shop = shop().await;
  let tx = shop.store.begin().await.unwrap();
  for order in [
    order_at(&shop, 777, at(2024, 7, 31, 23, 59)),
    order_at(&shop, 300, at(2024, 12, 31, 23, 30)),
    order_at(&shop, 100, at(2025, 1, 1, 0, 0)),
    order_at(&shop, 250, at(2025, 2, 10, 9, 0)),
    order_at(&shop, 50, at(2025, 2, 28, 23, 59)),
    order_at(&shop, 999, at(2025, 3, 1, 0, 0)),
  ] {
    tx.insert_order(&order).await.unwrap();
  }
  for (email, created_at) in [
    ("dec@tayar.my", at(2024, 12, 5, 8, 0)),
    ("feb1@tayar.my", at(2025, 2, 1, 0, 0)),
    ("feb2@tayar.my", at(2025, 2, 20, 17, 45)),
  ] {
    tx.insert_account(&Account {
      created_at,
      ..Account::new(email, false)
    })
    .await
    .unwrap();
  }
  tx.commit().await.unwrap();
  let today = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();

  let buckets = reporting::sales_and_orders(&shop.state, &shop.admin, today).await.unwrap();
  let rows: Vec<(i32, u32, i64, i64)> = buckets
    .iter()
    .map(|b| (b.year, b.month, b.total_sales, b.order_count))
    .collect();
  assert_eq!(
    rows,
    vec![
      (2024, 8, 0, 0),
      (2024, 9, 0, 0),
      (2024, 10, 0, 0),
      (2024, 11, 0, 0),
      (2024, 12, 300, 1),
      (2025, 1, 100, 1),
      (2025, 2, 300, 2),
    ]
  );

  let users = reporting::registered_users(&shop.state, &shop.admin, today).await.unwrap();
  assert_eq!(users.iter().map(|c| c.count).collect::<Vec<_>>(), vec![0, 0, 0, 0, 1, 0, 2]);
  assert_eq!(users[4].label, "December");

  let stats = reporting::order_statistics(&shop.state, &shop.admin, today).await.unwrap();
  assert_eq!(stats.iter().map(|c| c.count).collect::<Vec<_>>(), vec![0, 0, 0, 0, 1, 1, 2]);

  let dashboard = reporting::dashboard(&shop.state, &shop.admin, today).await.unwrap();
  assert_eq!((dashboard.month_now, dashboard.previous_month), (2, 1));
  assert_eq!(dashboard.total_revenue, 300);
  assert_eq!(dashboard.previous_total_revenue, 100);
  assert_eq!(dashboard.num_orders, 2);
  assert_eq!(dashboard.this_month_users, 2);
  assert_eq!(dashboard.previous_month_users, 0);
}
