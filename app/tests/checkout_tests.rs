// tests/checkout_tests.rs
mod common;

use common::*;
use tayarpro::config::AppConfig;
use tayarpro::errors::AppError;
use tayarpro::models::{AppointmentStatus, PaymentMethod};
use tayarpro::services::{cart_service, notifications, order_service};
use tayarpro::store::{RowCounts, ShopStore};

#[tokio::test]
async fn test_checkout_totals_and_details() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, TYRE_ID, 2).await.unwrap();
  cart_service::add_item(&shop.state, &shop.customer, SERVICE_ID, 1).await.unwrap();

  let receipt = order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();

  assert_eq!(receipt.total_price, 250);
  let order = order_service::order_detail(&shop.state, &shop.customer, receipt.order_id)
    .await
    .unwrap();
  assert_eq!(order.order.total_price, 250);
  assert_eq!(order.order.payment_method, PaymentMethod::Card);
  assert_eq!(order.order.appointment_id, Some(receipt.appointment_id));

  let mut line_totals: Vec<(String, i64)> = order
    .details
    .iter()
    .map(|d| (d.product_id.clone(), d.total_price))
    .collect();
  line_totals.sort();
  assert_eq!(line_totals, vec![(SERVICE_ID.to_string(), 50), (TYRE_ID.to_string(), 200)]);
  assert_eq!(order.details.iter().map(|d| d.total_price).sum::<i64>(), order.order.total_price);
  assert!(order.details.iter().all(|d| d.car_id == shop.car_id));
}

#[tokio::test]
async fn test_checkout_writes_one_of_each_and_empties_cart() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, TYRE_ID, 1).await.unwrap();
  let before = shop.store.row_counts().await;

  let receipt = order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();

  let after = shop.store.row_counts().await;
  assert_eq!(after.orders, before.orders + 1);
  assert_eq!(after.appointments, before.appointments + 1);
  assert_eq!(after.notifications, before.notifications + 1);
  assert_eq!(after.order_details, before.order_details + 1);
  assert_eq!(after.cart_lines, 0);

  let tx = shop.store.begin().await.unwrap();
  let appointment = tx.appointment(receipt.appointment_id).await.unwrap().unwrap();
  tx.commit().await.unwrap();
  assert_eq!(appointment.status, AppointmentStatus::Future);
  assert_eq!(appointment.bay, 2);
  assert_eq!(appointment.car_id, shop.car_id);
  assert_eq!(appointment.scheduled_at, slot("2025-03-14", "10:00"));
}

#[tokio::test]
async fn test_checkout_emits_order_notification() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, TYRE_ID, 2).await.unwrap();
  cart_service::add_item(&shop.state, &shop.customer, SERVICE_ID, 1).await.unwrap();

  order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();

  let feed = notifications::recent(&shop.state, &shop.admin).await.unwrap();
  assert_eq!(feed.len(), 1);
  assert_eq!(
    feed[0].message,
    format!("New order placed by {} with total price of RM 2.50", shop.customer_email)
  );
  assert_eq!(feed[0].category, "Order");
  assert_eq!(feed[0].icon, "fas fa-shopping-cart");
  assert_eq!(feed[0].status, "Active");
}

#[tokio::test]
async fn test_empty_cart_persists_nothing() {
  let shop = shop().await;

  let err = order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::EmptyCart));
  assert_eq!(shop.store.row_counts().await, RowCounts::default());
}

#[tokio::test]
async fn test_foreign_car_persists_nothing() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, TYRE_ID, 2).await.unwrap();

  let err = order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.other_car_id))
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::CarNotFound(_)));
  let counts = shop.store.row_counts().await;
  assert_eq!(counts.orders, 0);
  assert_eq!(counts.appointments, 0);
  assert_eq!(counts.notifications, 0);
  assert_eq!(counts.cart_lines, 1);
  assert_eq!(shop.stock(TYRE_ID).await, TYRE_STOCK - 2);
}

#[tokio::test]
async fn test_bay_out_of_range_is_rejected() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, SERVICE_ID, 1).await.unwrap();
  let mut request = checkout_request(shop.car_id);
  request.bay = 0;

  let err = order_service::checkout(&shop.state, &shop.customer, request).await.unwrap_err();

  assert!(matches!(err, AppError::Validation(_)));
  assert_eq!(shop.store.row_counts().await.orders, 0);
}

#[tokio::test]
async fn test_cart_and_car_errors_win_over_bad_bay() {
  let shop = shop().await;
  let mut request = checkout_request(shop.car_id);
  request.bay = 99;

  let err = order_service::checkout(&shop.state, &shop.customer, request.clone()).await.unwrap_err();
  assert!(matches!(err, AppError::EmptyCart));

  cart_service::add_item(&shop.state, &shop.customer, SERVICE_ID, 1).await.unwrap();
  request.car_id = shop.other_car_id;
  let err = order_service::checkout(&shop.state, &shop.customer, request).await.unwrap_err();
  assert!(matches!(err, AppError::CarNotFound(_)));
  assert_eq!(shop.store.row_counts().await.orders, 0);
}

#[tokio::test]
async fn test_double_booking_allowed_by_default() {
  let shop = shop().await;
  for claims in [&shop.customer, &shop.other] {
    cart_service::add_item(&shop.state, claims, SERVICE_ID, 1).await.unwrap();
  }

  order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();
  order_service::checkout(&shop.state, &shop.other, checkout_request(shop.other_car_id))
    .await
    .unwrap();

  assert_eq!(shop.store.row_counts().await.appointments, 2);
}

#[tokio::test]
async fn test_double_booking_rejected_when_configured_and_rolled_back() {
  let shop = shop_with(AppConfig {
    reject_double_booking: true,
    ..AppConfig::in_memory()
  })
  .await;
  for claims in [&shop.customer, &shop.other] {
    cart_service::add_item(&shop.state, claims, SERVICE_ID, 1).await.unwrap();
  }
  order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();

  let err = order_service::checkout(&shop.state, &shop.other, checkout_request(shop.other_car_id))
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::Conflict(_)));
  let counts = shop.store.row_counts().await;
  assert_eq!(counts.orders, 1);
  assert_eq!(counts.order_details, 1);
  assert_eq!(counts.appointments, 1);
  assert_eq!(counts.notifications, 1);
  // The failed checkout's cart survives the rollback.
  assert_eq!(counts.cart_lines, 1);
}

#[tokio::test]
async fn test_order_history_and_access() {
  let shop = shop().await;
  cart_service::add_item(&shop.state, &shop.customer, SERVICE_ID, 1).await.unwrap();
  let receipt = order_service::checkout(&shop.state, &shop.customer, checkout_request(shop.car_id))
    .await
    .unwrap();

  let orders = order_service::list_orders(&shop.state, &shop.customer).await.unwrap();
  assert_eq!(orders.len(), 1);
  assert_eq!(orders[0].id, receipt.order_id);
  assert!(order_service::list_orders(&shop.state, &shop.other).await.unwrap().is_empty());

  let err = order_service::order_detail(&shop.state, &shop.other, receipt.order_id)
    .await
    .unwrap_err();
  assert!(matches!(err, AppError::Unauthorized(_)));
  assert!(order_service::order_detail(&shop.state, &shop.admin, receipt.order_id).await.is_ok());

  let err = order_service::order_detail(&shop.state, &shop.customer, uuid::Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
}
