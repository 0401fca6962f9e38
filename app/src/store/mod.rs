// src/store/mod.rs

//! Persistence seam. A `ShopStore` hands out one `ShopTx` per unit of work;
//! everything a request writes goes through that transaction and becomes visible
//! only when it commits.

pub mod memory;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use tayar_flow::UnitOfWork;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{
  Account, Appointment, CarSpec, CarSpecInput, CartLine, Notification, Order, OrderDetail, Product, RegisteredCar,
  Service, Tyre,
};

pub use memory::{MemoryStore, RowCounts};
pub use postgres::PgStore;

#[async_trait]
pub trait ShopStore: Send + Sync {
  async fn begin(&self) -> Result<Arc<dyn ShopTx>>;
}

/// One unit of work against the shop's tables.
///
/// Dropping a transaction without committing discards its writes.
#[async_trait]
pub trait ShopTx: UnitOfWork {
  fn as_unit_of_work(&self) -> &dyn UnitOfWork;

  // --- accounts ---
  async fn account(&self, id: Uuid) -> Result<Option<Account>>;
  /// Admins first, then by creation time.
  async fn list_accounts(&self) -> Result<Vec<Account>>;
  async fn insert_account(&self, account: &Account) -> Result<()>;
  /// Returns `false` if the account does not exist.
  async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<bool>;

  // --- catalog ---
  async fn product(&self, id: &str) -> Result<Option<Product>>;
  async fn list_products(&self) -> Result<Vec<Product>>;
  async fn insert_tyre(&self, tyre: &Tyre) -> Result<()>;
  async fn insert_service(&self, service: &Service) -> Result<()>;
  /// Returns `false` if the tyre does not exist.
  async fn update_tyre(&self, tyre: &Tyre) -> Result<bool>;
  async fn update_service(&self, service: &Service) -> Result<bool>;
  /// Decrements tyre stock by `quantity` only if at least `quantity` is on hand.
  /// Returns `false` when stock is short; stock is then untouched.
  async fn take_stock(&self, product_id: &str, quantity: i64) -> Result<bool>;
  async fn return_stock(&self, product_id: &str, quantity: i64) -> Result<()>;

  // --- cart ---
  /// Ordered by creation time.
  async fn cart_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>>;
  async fn cart_line(&self, account_id: Uuid, product_id: &str) -> Result<Option<CartLine>>;
  /// Inserts the line or replaces the quantity of an existing one.
  async fn upsert_cart_line(&self, line: &CartLine) -> Result<()>;
  async fn delete_cart_line(&self, account_id: Uuid, product_id: &str) -> Result<bool>;
  async fn clear_cart(&self, account_id: Uuid) -> Result<u64>;

  // --- orders ---
  async fn insert_order(&self, order: &Order) -> Result<()>;
  async fn insert_order_detail(&self, detail: &OrderDetail) -> Result<()>;
  async fn link_appointment(&self, order_id: Uuid, appointment_id: Uuid) -> Result<()>;
  async fn order(&self, id: Uuid) -> Result<Option<Order>>;
  /// Newest first.
  async fn orders_for(&self, account_id: Uuid) -> Result<Vec<Order>>;
  async fn order_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>>;

  // --- appointments ---
  async fn insert_appointment(&self, appointment: &Appointment) -> Result<()>;
  async fn appointment(&self, id: Uuid) -> Result<Option<Appointment>>;
  /// Whether a `Future` appointment already holds this bay at this time.
  async fn bay_taken(&self, bay: i32, scheduled_at: NaiveDateTime) -> Result<bool>;

  // --- notifications ---
  async fn insert_notification(&self, notification: &Notification) -> Result<()>;
  /// Newest first.
  async fn recent_notifications(&self, limit: i64) -> Result<Vec<Notification>>;

  // --- vehicles ---
  async fn car_specs(&self) -> Result<Vec<CarSpec>>;
  async fn car_spec(&self, id: i64) -> Result<Option<CarSpec>>;
  async fn insert_car_spec(&self, input: &CarSpecInput) -> Result<CarSpec>;
  async fn update_car_spec(&self, id: i64, input: &CarSpecInput) -> Result<Option<CarSpec>>;
  /// `Conflict` while a registered car still uses the spec.
  async fn delete_car_spec(&self, id: i64) -> Result<bool>;
  async fn registered_car(&self, car_id: i64) -> Result<Option<RegisteredCar>>;
  async fn cars_for(&self, account_id: Uuid) -> Result<Vec<RegisteredCar>>;
  async fn insert_registered_car(&self, account_id: Uuid, car_spec_id: i64, plate_number: &str)
    -> Result<RegisteredCar>;

  // --- reporting ---
  /// `(sum of total_price, order count)` for orders created in `[from, to)`.
  async fn order_totals_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<(i64, i64)>;
  /// Accounts created in `[from, to)`.
  async fn accounts_created_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64>;
}
