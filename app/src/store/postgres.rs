// src/store/postgres.rs

//! PostgreSQL backend. One `PgTx` wraps one `sqlx::Transaction`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tayar_flow::UnitOfWork;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{event, instrument, Level};
use uuid::Uuid;

use super::{ShopStore, ShopTx};
use crate::errors::{AppError, Result};
use crate::models::{
  Account, Appointment, CarSpec, CarSpecInput, CartLine, Notification, Order, OrderDetail, Product, RegisteredCar,
  Service, Tyre,
};

const TYRE_COLUMNS: &str = "id, brand_id, description, car_type, image_link, unit_price, tyre_size, speed_index, \
                            load_index, stock, status, created_by, created_at";
const SERVICE_COLUMNS: &str = "id, type_id, description, car_type, unit_price, status, created_by, created_at";
const ORDER_COLUMNS: &str = "id, account_id, total_price, payment_method, appointment_id, created_at";

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    Ok(Self::new(pool))
  }

  /// Applies `schema.sql`. Statements are idempotent.
  pub async fn apply_schema(&self) -> Result<()> {
    sqlx::raw_sql(include_str!("../../schema.sql")).execute(&self.pool).await?;
    event!(Level::INFO, "Database schema applied.");
    Ok(())
  }
}

#[async_trait]
impl ShopStore for PgStore {
  async fn begin(&self) -> Result<Arc<dyn ShopTx>> {
    let tx = self.pool.begin().await?;
    Ok(Arc::new(PgTx {
      tx: AsyncMutex::new(Some(tx)),
    }))
  }
}

pub struct PgTx {
  tx: AsyncMutex<Option<Transaction<'static, Postgres>>>,
}

/// The live transaction in `slot`, or `Internal` once it has been committed or rolled back.
fn open<'a>(slot: &'a mut Option<Transaction<'static, Postgres>>) -> Result<&'a mut Transaction<'static, Postgres>> {
  slot
    .as_mut()
    .ok_or_else(|| AppError::Internal("Transaction already finished.".to_string()))
}

impl PgTx {

  async fn take(&self) -> anyhow::Result<Transaction<'static, Postgres>> {
    self
      .tx
      .lock()
      .await
      .take()
      .ok_or_else(|| anyhow::anyhow!("Transaction already finished."))
  }
}

#[async_trait]
impl UnitOfWork for PgTx {
  async fn commit(&self) -> anyhow::Result<()> {
    self.take().await?.commit().await?;
    Ok(())
  }

  async fn rollback(&self) -> anyhow::Result<()> {
    self.take().await?.rollback().await?;
    Ok(())
  }
}

#[async_trait]
impl ShopTx for PgTx {
  fn as_unit_of_work(&self) -> &dyn UnitOfWork {
    self
  }

  async fn account(&self, id: Uuid) -> Result<Option<Account>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let account = sqlx::query_as::<_, Account>("SELECT id, email, is_admin, created_at FROM accounts WHERE id = $1")
      .bind(id)
      .fetch_optional(&mut **conn)
      .await?;
    Ok(account)
  }

  async fn list_accounts(&self) -> Result<Vec<Account>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let accounts = sqlx::query_as::<_, Account>(
      "SELECT id, email, is_admin, created_at FROM accounts ORDER BY is_admin DESC, created_at ASC",
    )
    .fetch_all(&mut **conn)
    .await?;
    Ok(accounts)
  }

  async fn insert_account(&self, account: &Account) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    sqlx::query("INSERT INTO accounts (id, email, is_admin, created_at) VALUES ($1, $2, $3, $4)")
      .bind(account.id)
      .bind(&account.email)
      .bind(account.is_admin)
      .bind(account.created_at)
      .execute(&mut **conn)
      .await?;
    Ok(())
  }

  async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query("UPDATE accounts SET is_admin = $2 WHERE id = $1")
      .bind(id)
      .bind(is_admin)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    Ok(rows > 0)
  }

  async fn product(&self, id: &str) -> Result<Option<Product>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let tyre = sqlx::query_as::<_, Tyre>(&format!("SELECT {} FROM tyres WHERE id = $1", TYRE_COLUMNS))
      .bind(id)
      .fetch_optional(&mut **conn)
      .await?;
    if let Some(tyre) = tyre {
      return Ok(Some(Product::Tyre(tyre)));
    }
    let service = sqlx::query_as::<_, Service>(&format!("SELECT {} FROM services WHERE id = $1", SERVICE_COLUMNS))
      .bind(id)
      .fetch_optional(&mut **conn)
      .await?;
    Ok(service.map(Product::Service))
  }

  async fn list_products(&self) -> Result<Vec<Product>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let tyres = sqlx::query_as::<_, Tyre>(&format!("SELECT {} FROM tyres ORDER BY id", TYRE_COLUMNS))
      .fetch_all(&mut **conn)
      .await?;
    let services = sqlx::query_as::<_, Service>(&format!("SELECT {} FROM services ORDER BY id", SERVICE_COLUMNS))
      .fetch_all(&mut **conn)
      .await?;
    Ok(
      tyres
        .into_iter()
        .map(Product::Tyre)
        .chain(services.into_iter().map(Product::Service))
        .collect(),
    )
  }

  async fn insert_tyre(&self, tyre: &Tyre) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let taken: bool = sqlx::query_scalar(
      "SELECT EXISTS (SELECT 1 FROM tyres WHERE id = $1) OR EXISTS (SELECT 1 FROM services WHERE id = $1)",
    )
    .bind(&tyre.id)
    .fetch_one(&mut **conn)
    .await?;
    if taken {
      return Err(AppError::Conflict("ID already exists".to_string()));
    }
    sqlx::query(&format!(
      "INSERT INTO tyres ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
      TYRE_COLUMNS
    ))
    .bind(&tyre.id)
    .bind(&tyre.brand_id)
    .bind(&tyre.description)
    .bind(&tyre.car_type)
    .bind(&tyre.image_link)
    .bind(tyre.unit_price)
    .bind(&tyre.tyre_size)
    .bind(&tyre.speed_index)
    .bind(tyre.load_index)
    .bind(tyre.stock)
    .bind(&tyre.status)
    .bind(tyre.created_by)
    .bind(tyre.created_at)
    .execute(&mut **conn)
    .await?;
    Ok(())
  }

  async fn insert_service(&self, service: &Service) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let taken: bool = sqlx::query_scalar(
      "SELECT EXISTS (SELECT 1 FROM services WHERE id = $1) OR EXISTS (SELECT 1 FROM tyres WHERE id = $1)",
    )
    .bind(&service.id)
    .fetch_one(&mut **conn)
    .await?;
    if taken {
      return Err(AppError::Conflict("ID already exists".to_string()));
    }
    sqlx::query(&format!(
      "INSERT INTO services ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
      SERVICE_COLUMNS
    ))
    .bind(&service.id)
    .bind(&service.type_id)
    .bind(&service.description)
    .bind(&service.car_type)
    .bind(service.unit_price)
    .bind(&service.status)
    .bind(service.created_by)
    .bind(service.created_at)
    .execute(&mut **conn)
    .await?;
    Ok(())
  }

  async fn update_tyre(&self, tyre: &Tyre) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query(
      "UPDATE tyres SET brand_id = $2, description = $3, car_type = $4, image_link = $5, unit_price = $6, \
       tyre_size = $7, speed_index = $8, load_index = $9, stock = $10, status = $11 WHERE id = $1",
    )
    .bind(&tyre.id)
    .bind(&tyre.brand_id)
    .bind(&tyre.description)
    .bind(&tyre.car_type)
    .bind(&tyre.image_link)
    .bind(tyre.unit_price)
    .bind(&tyre.tyre_size)
    .bind(&tyre.speed_index)
    .bind(tyre.load_index)
    .bind(tyre.stock)
    .bind(&tyre.status)
    .execute(&mut **conn)
    .await?
    .rows_affected();
    Ok(rows > 0)
  }

  async fn update_service(&self, service: &Service) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query(
      "UPDATE services SET type_id = $2, description = $3, car_type = $4, unit_price = $5, status = $6 WHERE id = $1",
    )
    .bind(&service.id)
    .bind(&service.type_id)
    .bind(&service.description)
    .bind(&service.car_type)
    .bind(service.unit_price)
    .bind(&service.status)
    .execute(&mut **conn)
    .await?
    .rows_affected();
    Ok(rows > 0)
  }

  #[instrument(name = "PgTx::take_stock", skip(self))]
  async fn take_stock(&self, product_id: &str, quantity: i64) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query("UPDATE tyres SET stock = stock - $2 WHERE id = $1 AND stock >= $2")
      .bind(product_id)
      .bind(quantity)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    Ok(rows == 1)
  }

  async fn return_stock(&self, product_id: &str, quantity: i64) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query("UPDATE tyres SET stock = stock + $2 WHERE id = $1")
      .bind(product_id)
      .bind(quantity)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    if rows == 0 {
      return Err(AppError::NotFound("Product not found".to_string()));
    }
    Ok(())
  }

  async fn cart_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let lines = sqlx::query_as::<_, CartLine>(
      "SELECT account_id, product_id, quantity, unit_price, description, created_at FROM cart_lines \
       WHERE account_id = $1 ORDER BY created_at ASC",
    )
    .bind(account_id)
    .fetch_all(&mut **conn)
    .await?;
    Ok(lines)
  }

  async fn cart_line(&self, account_id: Uuid, product_id: &str) -> Result<Option<CartLine>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let line = sqlx::query_as::<_, CartLine>(
      "SELECT account_id, product_id, quantity, unit_price, description, created_at FROM cart_lines \
       WHERE account_id = $1 AND product_id = $2",
    )
    .bind(account_id)
    .bind(product_id)
    .fetch_optional(&mut **conn)
    .await?;
    Ok(line)
  }

  async fn upsert_cart_line(&self, line: &CartLine) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    sqlx::query(
      "INSERT INTO cart_lines (account_id, product_id, quantity, unit_price, description, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6) \
       ON CONFLICT (account_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity",
    )
    .bind(line.account_id)
    .bind(&line.product_id)
    .bind(line.quantity)
    .bind(line.unit_price)
    .bind(&line.description)
    .bind(line.created_at)
    .execute(&mut **conn)
    .await?;
    Ok(())
  }

  async fn delete_cart_line(&self, account_id: Uuid, product_id: &str) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query("DELETE FROM cart_lines WHERE account_id = $1 AND product_id = $2")
      .bind(account_id)
      .bind(product_id)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    Ok(rows > 0)
  }

  async fn clear_cart(&self, account_id: Uuid) -> Result<u64> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query("DELETE FROM cart_lines WHERE account_id = $1")
      .bind(account_id)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    Ok(rows)
  }

  async fn insert_order(&self, order: &Order) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    sqlx::query(&format!("INSERT INTO orders ({}) VALUES ($1, $2, $3, $4, $5, $6)", ORDER_COLUMNS))
      .bind(order.id)
      .bind(order.account_id)
      .bind(order.total_price)
      .bind(order.payment_method)
      .bind(order.appointment_id)
      .bind(order.created_at)
      .execute(&mut **conn)
      .await?;
    Ok(())
  }

  async fn insert_order_detail(&self, detail: &OrderDetail) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    sqlx::query(
      "INSERT INTO order_details (order_id, product_id, quantity, unit_price, car_id, total_price) \
       VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(detail.order_id)
    .bind(&detail.product_id)
    .bind(detail.quantity)
    .bind(detail.unit_price)
    .bind(detail.car_id)
    .bind(detail.total_price)
    .execute(&mut **conn)
    .await?;
    Ok(())
  }

  async fn link_appointment(&self, order_id: Uuid, appointment_id: Uuid) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let rows = sqlx::query("UPDATE orders SET appointment_id = $2 WHERE id = $1")
      .bind(order_id)
      .bind(appointment_id)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    if rows == 0 {
      return Err(AppError::NotFound("Order not found".to_string()));
    }
    Ok(())
  }

  async fn order(&self, id: Uuid) -> Result<Option<Order>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
      .bind(id)
      .fetch_optional(&mut **conn)
      .await?;
    Ok(order)
  }

  async fn orders_for(&self, account_id: Uuid) -> Result<Vec<Order>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let orders = sqlx::query_as::<_, Order>(&format!(
      "SELECT {} FROM orders WHERE account_id = $1 ORDER BY created_at DESC",
      ORDER_COLUMNS
    ))
    .bind(account_id)
    .fetch_all(&mut **conn)
    .await?;
    Ok(orders)
  }

  async fn order_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let details = sqlx::query_as::<_, OrderDetail>(
      "SELECT order_id, product_id, quantity, unit_price, car_id, total_price FROM order_details \
       WHERE order_id = $1 ORDER BY product_id",
    )
    .bind(order_id)
    .fetch_all(&mut **conn)
    .await?;
    Ok(details)
  }

  async fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    sqlx::query(
      "INSERT INTO appointments (id, account_id, car_id, scheduled_at, bay, status, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(appointment.id)
    .bind(appointment.account_id)
    .bind(appointment.car_id)
    .bind(appointment.scheduled_at)
    .bind(appointment.bay)
    .bind(appointment.status)
    .bind(appointment.created_at)
    .execute(&mut **conn)
    .await?;
    Ok(())
  }

  async fn appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let appointment = sqlx::query_as::<_, Appointment>(
      "SELECT id, account_id, car_id, scheduled_at, bay, status, created_at FROM appointments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut **conn)
    .await?;
    Ok(appointment)
  }

  async fn bay_taken(&self, bay: i32, scheduled_at: NaiveDateTime) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let taken: bool = sqlx::query_scalar(
      "SELECT EXISTS (SELECT 1 FROM appointments WHERE bay = $1 AND scheduled_at = $2 AND status = 'Future')",
    )
    .bind(bay)
    .bind(scheduled_at)
    .fetch_one(&mut **conn)
    .await?;
    Ok(taken)
  }

  async fn insert_notification(&self, notification: &Notification) -> Result<()> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    sqlx::query(
      "INSERT INTO notifications (id, message, category, icon, status, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(notification.id)
    .bind(&notification.message)
    .bind(&notification.category)
    .bind(&notification.icon)
    .bind(&notification.status)
    .bind(notification.created_at)
    .execute(&mut **conn)
    .await?;
    Ok(())
  }

  async fn recent_notifications(&self, limit: i64) -> Result<Vec<Notification>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let notifications = sqlx::query_as::<_, Notification>(
      "SELECT id, message, category, icon, status, created_at FROM notifications ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit.max(0))
    .fetch_all(&mut **conn)
    .await?;
    Ok(notifications)
  }

  async fn car_specs(&self) -> Result<Vec<CarSpec>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let specs = sqlx::query_as::<_, CarSpec>(
      "SELECT id, brand, model, year, tyre_size, car_type FROM car_specs ORDER BY id",
    )
    .fetch_all(&mut **conn)
    .await?;
    Ok(specs)
  }

  async fn car_spec(&self, id: i64) -> Result<Option<CarSpec>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let spec = sqlx::query_as::<_, CarSpec>(
      "SELECT id, brand, model, year, tyre_size, car_type FROM car_specs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut **conn)
    .await?;
    Ok(spec)
  }

  async fn insert_car_spec(&self, input: &CarSpecInput) -> Result<CarSpec> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let spec = sqlx::query_as::<_, CarSpec>(
      "INSERT INTO car_specs (brand, model, year, tyre_size, car_type) VALUES ($1, $2, $3, $4, $5) \
       RETURNING id, brand, model, year, tyre_size, car_type",
    )
    .bind(&input.brand)
    .bind(&input.model)
    .bind(input.year)
    .bind(&input.tyre_size)
    .bind(input.car_type)
    .fetch_one(&mut **conn)
    .await?;
    Ok(spec)
  }

  async fn update_car_spec(&self, id: i64, input: &CarSpecInput) -> Result<Option<CarSpec>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let spec = sqlx::query_as::<_, CarSpec>(
      "UPDATE car_specs SET brand = $2, model = $3, year = $4, tyre_size = $5, car_type = $6 WHERE id = $1 \
       RETURNING id, brand, model, year, tyre_size, car_type",
    )
    .bind(id)
    .bind(&input.brand)
    .bind(&input.model)
    .bind(input.year)
    .bind(&input.tyre_size)
    .bind(input.car_type)
    .fetch_optional(&mut **conn)
    .await?;
    Ok(spec)
  }

  async fn delete_car_spec(&self, id: i64) -> Result<bool> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let in_use: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM registered_cars WHERE car_spec_id = $1)")
      .bind(id)
      .fetch_one(&mut **conn)
      .await?;
    if in_use {
      return Err(AppError::Conflict("Car spec is in use".to_string()));
    }
    let rows = sqlx::query("DELETE FROM car_specs WHERE id = $1")
      .bind(id)
      .execute(&mut **conn)
      .await?
      .rows_affected();
    Ok(rows > 0)
  }

  async fn registered_car(&self, car_id: i64) -> Result<Option<RegisteredCar>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let car = sqlx::query_as::<_, RegisteredCar>(
      "SELECT id, account_id, car_spec_id, plate_number, created_at FROM registered_cars WHERE id = $1",
    )
    .bind(car_id)
    .fetch_optional(&mut **conn)
    .await?;
    Ok(car)
  }

  async fn cars_for(&self, account_id: Uuid) -> Result<Vec<RegisteredCar>> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let cars = sqlx::query_as::<_, RegisteredCar>(
      "SELECT id, account_id, car_spec_id, plate_number, created_at FROM registered_cars \
       WHERE account_id = $1 ORDER BY id",
    )
    .bind(account_id)
    .fetch_all(&mut **conn)
    .await?;
    Ok(cars)
  }

  async fn insert_registered_car(
    &self,
    account_id: Uuid,
    car_spec_id: i64,
    plate_number: &str,
  ) -> Result<RegisteredCar> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let car = sqlx::query_as::<_, RegisteredCar>(
      "INSERT INTO registered_cars (account_id, car_spec_id, plate_number, created_at) VALUES ($1, $2, $3, NOW()) \
       RETURNING id, account_id, car_spec_id, plate_number, created_at",
    )
    .bind(account_id)
    .bind(car_spec_id)
    .bind(plate_number)
    .fetch_one(&mut **conn)
    .await?;
    Ok(car)
  }

  async fn order_totals_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<(i64, i64)> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let totals = sqlx::query_as::<_, (i64, i64)>(
      "SELECT COALESCE(SUM(total_price), 0)::BIGINT, COUNT(*) FROM orders WHERE created_at >= $1 AND created_at < $2",
    )
    .bind(from)
    .bind(to)
    .fetch_one(&mut **conn)
    .await?;
    Ok(totals)
  }

  async fn accounts_created_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64> {
    let mut guard = self.tx.lock().await;
    let conn = open(&mut guard)?;
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE created_at >= $1 AND created_at < $2")
      .bind(from)
      .bind(to)
      .fetch_one(&mut **conn)
      .await?;
    Ok(count)
  }
}
