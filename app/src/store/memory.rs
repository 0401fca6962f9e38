// src/store/memory.rs

//! In-process store for tests and demos.
//!
//! A transaction holds the store's async mutex for its whole life and works on
//! a private copy of the data. Commit swaps the copy in; rollback or drop
//! discards it. Units of work are therefore serialised.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tayar_flow::UnitOfWork;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{event, Level};
use uuid::Uuid;

use super::{ShopStore, ShopTx};
use crate::errors::{AppError, Result};
use crate::models::{
  Account, Appointment, AppointmentStatus, CarSpec, CarSpecInput, CartLine, Notification, Order, OrderDetail,
  Product, RegisteredCar, Service, Tyre,
};

#[derive(Debug, Clone, Default)]
pub struct ShopData {
  accounts: BTreeMap<Uuid, Account>,
  tyres: BTreeMap<String, Tyre>,
  services: BTreeMap<String, Service>,
  cart: Vec<CartLine>,
  orders: Vec<Order>,
  order_details: Vec<OrderDetail>,
  appointments: Vec<Appointment>,
  notifications: Vec<Notification>,
  car_specs: BTreeMap<i64, CarSpec>,
  cars: BTreeMap<i64, RegisteredCar>,
  next_car_spec_id: i64,
  next_car_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
  data: Arc<AsyncMutex<ShopData>>,
}

/// Row counts per table, as of the last commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
  pub cart_lines: usize,
  pub orders: usize,
  pub order_details: usize,
  pub appointments: usize,
  pub notifications: usize,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Waits for any open transaction to finish.
  pub async fn row_counts(&self) -> RowCounts {
    let data = self.data.lock().await;
    RowCounts {
      cart_lines: data.cart.len(),
      orders: data.orders.len(),
      order_details: data.order_details.len(),
      appointments: data.appointments.len(),
      notifications: data.notifications.len(),
    }
  }
}

#[async_trait]
impl ShopStore for MemoryStore {
  async fn begin(&self) -> Result<Arc<dyn ShopTx>> {
    let guard = self.data.clone().lock_owned().await;
    let working = guard.clone();
    Ok(Arc::new(MemoryTx {
      guard: Mutex::new(Some(guard)),
      working: Mutex::new(working),
    }))
  }
}

pub struct MemoryTx {
  guard: Mutex<Option<OwnedMutexGuard<ShopData>>>,
  working: Mutex<ShopData>,
}

impl MemoryTx {
  fn ensure_open(&self) -> Result<()> {
    if self.guard.lock().is_some() {
      Ok(())
    } else {
      Err(AppError::Internal("Transaction already finished.".to_string()))
    }
  }

  fn read<T>(&self, f: impl FnOnce(&ShopData) -> T) -> Result<T> {
    self.ensure_open()?;
    Ok(f(&*self.working.lock()))
  }

  fn write<T>(&self, f: impl FnOnce(&mut ShopData) -> Result<T>) -> Result<T> {
    self.ensure_open()?;
    f(&mut *self.working.lock())
  }
}

#[async_trait]
impl UnitOfWork for MemoryTx {
  async fn commit(&self) -> anyhow::Result<()> {
    let mut guard = self
      .guard
      .lock()
      .take()
      .ok_or_else(|| anyhow::anyhow!("Transaction already finished."))?;
    *guard = std::mem::take(&mut *self.working.lock());
    event!(Level::TRACE, "Memory transaction committed.");
    Ok(())
  }

  async fn rollback(&self) -> anyhow::Result<()> {
    if self.guard.lock().take().is_none() {
      anyhow::bail!("Transaction already finished.");
    }
    event!(Level::TRACE, "Memory transaction rolled back.");
    Ok(())
  }
}

#[async_trait]
impl ShopTx for MemoryTx {
  fn as_unit_of_work(&self) -> &dyn UnitOfWork {
    self
  }

  async fn account(&self, id: Uuid) -> Result<Option<Account>> {
    self.read(|d| d.accounts.get(&id).cloned())
  }

  async fn list_accounts(&self) -> Result<Vec<Account>> {
    self.read(|d| {
      let mut accounts: Vec<Account> = d.accounts.values().cloned().collect();
      accounts.sort_by(|a, b| b.is_admin.cmp(&a.is_admin).then(a.created_at.cmp(&b.created_at)));
      accounts
    })
  }

  async fn insert_account(&self, account: &Account) -> Result<()> {
    self.write(|d| {
      d.accounts.insert(account.id, account.clone());
      Ok(())
    })
  }

  async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<bool> {
    self.write(|d| match d.accounts.get_mut(&id) {
      Some(account) => {
        account.is_admin = is_admin;
        Ok(true)
      }
      None => Ok(false),
    })
  }

  async fn product(&self, id: &str) -> Result<Option<Product>> {
    self.read(|d| {
      d.tyres
        .get(id)
        .cloned()
        .map(Product::Tyre)
        .or_else(|| d.services.get(id).cloned().map(Product::Service))
    })
  }

  async fn list_products(&self) -> Result<Vec<Product>> {
    self.read(|d| {
      d.tyres
        .values()
        .cloned()
        .map(Product::Tyre)
        .chain(d.services.values().cloned().map(Product::Service))
        .collect()
    })
  }

  async fn insert_tyre(&self, tyre: &Tyre) -> Result<()> {
    self.write(|d| {
      if d.tyres.contains_key(&tyre.id) || d.services.contains_key(&tyre.id) {
        return Err(AppError::Conflict("ID already exists".to_string()));
      }
      d.tyres.insert(tyre.id.clone(), tyre.clone());
      Ok(())
    })
  }

  async fn insert_service(&self, service: &Service) -> Result<()> {
    self.write(|d| {
      if d.services.contains_key(&service.id) || d.tyres.contains_key(&service.id) {
        return Err(AppError::Conflict("ID already exists".to_string()));
      }
      d.services.insert(service.id.clone(), service.clone());
      Ok(())
    })
  }

  async fn update_tyre(&self, tyre: &Tyre) -> Result<bool> {
    self.write(|d| match d.tyres.get_mut(&tyre.id) {
      Some(existing) => {
        let created_by = existing.created_by;
        let created_at = existing.created_at;
        *existing = Tyre {
          created_by,
          created_at,
          ..tyre.clone()
        };
        Ok(true)
      }
      None => Ok(false),
    })
  }

  async fn update_service(&self, service: &Service) -> Result<bool> {
    self.write(|d| match d.services.get_mut(&service.id) {
      Some(existing) => {
        let created_by = existing.created_by;
        let created_at = existing.created_at;
        *existing = Service {
          created_by,
          created_at,
          ..service.clone()
        };
        Ok(true)
      }
      None => Ok(false),
    })
  }

  async fn take_stock(&self, product_id: &str, quantity: i64) -> Result<bool> {
    self.write(|d| match d.tyres.get_mut(product_id) {
      Some(tyre) if tyre.stock >= quantity => {
        tyre.stock -= quantity;
        Ok(true)
      }
      Some(_) => Ok(false),
      None => Err(AppError::NotFound("Product not found".to_string())),
    })
  }

  async fn return_stock(&self, product_id: &str, quantity: i64) -> Result<()> {
    self.write(|d| match d.tyres.get_mut(product_id) {
      Some(tyre) => {
        tyre.stock += quantity;
        Ok(())
      }
      None => Err(AppError::NotFound("Product not found".to_string())),
    })
  }

  async fn cart_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>> {
    self.read(|d| {
      let mut lines: Vec<CartLine> = d.cart.iter().filter(|l| l.account_id == account_id).cloned().collect();
      lines.sort_by_key(|l| l.created_at);
      lines
    })
  }

  async fn cart_line(&self, account_id: Uuid, product_id: &str) -> Result<Option<CartLine>> {
    self.read(|d| {
      d.cart
        .iter()
        .find(|l| l.account_id == account_id && l.product_id == product_id)
        .cloned()
    })
  }

  async fn upsert_cart_line(&self, line: &CartLine) -> Result<()> {
    self.write(|d| {
      match d
        .cart
        .iter_mut()
        .find(|l| l.account_id == line.account_id && l.product_id == line.product_id)
      {
        Some(existing) => existing.quantity = line.quantity,
        None => d.cart.push(line.clone()),
      }
      Ok(())
    })
  }

  async fn delete_cart_line(&self, account_id: Uuid, product_id: &str) -> Result<bool> {
    self.write(|d| {
      let before = d.cart.len();
      d.cart.retain(|l| !(l.account_id == account_id && l.product_id == product_id));
      Ok(d.cart.len() != before)
    })
  }

  async fn clear_cart(&self, account_id: Uuid) -> Result<u64> {
    self.write(|d| {
      let before = d.cart.len();
      d.cart.retain(|l| l.account_id != account_id);
      Ok((before - d.cart.len()) as u64)
    })
  }

  async fn insert_order(&self, order: &Order) -> Result<()> {
    self.write(|d| {
      d.orders.push(order.clone());
      Ok(())
    })
  }

  async fn insert_order_detail(&self, detail: &OrderDetail) -> Result<()> {
    self.write(|d| {
      d.order_details.push(detail.clone());
      Ok(())
    })
  }

  async fn link_appointment(&self, order_id: Uuid, appointment_id: Uuid) -> Result<()> {
    self.write(|d| match d.orders.iter_mut().find(|o| o.id == order_id) {
      Some(order) => {
        order.appointment_id = Some(appointment_id);
        Ok(())
      }
      None => Err(AppError::NotFound("Order not found".to_string())),
    })
  }

  async fn order(&self, id: Uuid) -> Result<Option<Order>> {
    self.read(|d| d.orders.iter().find(|o| o.id == id).cloned())
  }

  async fn orders_for(&self, account_id: Uuid) -> Result<Vec<Order>> {
    self.read(|d| {
      let mut orders: Vec<Order> = d.orders.iter().filter(|o| o.account_id == account_id).cloned().collect();
      orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
      orders
    })
  }

  async fn order_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>> {
    self.read(|d| d.order_details.iter().filter(|l| l.order_id == order_id).cloned().collect())
  }

  async fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
    self.write(|d| {
      d.appointments.push(appointment.clone());
      Ok(())
    })
  }

  async fn appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
    self.read(|d| d.appointments.iter().find(|a| a.id == id).cloned())
  }

  async fn bay_taken(&self, bay: i32, scheduled_at: NaiveDateTime) -> Result<bool> {
    self.read(|d| {
      d.appointments
        .iter()
        .any(|a| a.bay == bay && a.scheduled_at == scheduled_at && a.status == AppointmentStatus::Future)
    })
  }

  async fn insert_notification(&self, notification: &Notification) -> Result<()> {
    self.write(|d| {
      d.notifications.push(notification.clone());
      Ok(())
    })
  }

  async fn recent_notifications(&self, limit: i64) -> Result<Vec<Notification>> {
    let limit = usize::try_from(limit.max(0)).unwrap_or(0);
    self.read(|d| {
      let mut all = d.notifications.clone();
      all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
      all.truncate(limit);
      all
    })
  }

  async fn car_specs(&self) -> Result<Vec<CarSpec>> {
    self.read(|d| d.car_specs.values().cloned().collect())
  }

  async fn car_spec(&self, id: i64) -> Result<Option<CarSpec>> {
    self.read(|d| d.car_specs.get(&id).cloned())
  }

  async fn insert_car_spec(&self, input: &CarSpecInput) -> Result<CarSpec> {
    self.write(|d| {
      d.next_car_spec_id += 1;
      let spec = spec_from_input(d.next_car_spec_id, input);
      d.car_specs.insert(spec.id, spec.clone());
      Ok(spec)
    })
  }

  async fn update_car_spec(&self, id: i64, input: &CarSpecInput) -> Result<Option<CarSpec>> {
    self.write(|d| match d.car_specs.get_mut(&id) {
      Some(existing) => {
        *existing = spec_from_input(id, input);
        Ok(Some(existing.clone()))
      }
      None => Ok(None),
    })
  }

  async fn delete_car_spec(&self, id: i64) -> Result<bool> {
    self.write(|d| {
      if d.cars.values().any(|c| c.car_spec_id == id) {
        return Err(AppError::Conflict("Car spec is in use".to_string()));
      }
      Ok(d.car_specs.remove(&id).is_some())
    })
  }

  async fn registered_car(&self, car_id: i64) -> Result<Option<RegisteredCar>> {
    self.read(|d| d.cars.get(&car_id).cloned())
  }

  async fn cars_for(&self, account_id: Uuid) -> Result<Vec<RegisteredCar>> {
    self.read(|d| d.cars.values().filter(|c| c.account_id == account_id).cloned().collect())
  }

  async fn insert_registered_car(
    &self,
    account_id: Uuid,
    car_spec_id: i64,
    plate_number: &str,
  ) -> Result<RegisteredCar> {
    self.write(|d| {
      d.next_car_id += 1;
      let car = RegisteredCar {
        id: d.next_car_id,
        account_id,
        car_spec_id,
        plate_number: plate_number.to_string(),
        created_at: Utc::now(),
      };
      d.cars.insert(car.id, car.clone());
      Ok(car)
    })
  }

  async fn order_totals_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<(i64, i64)> {
    self
      .read(|d| {
        d.orders
          .iter()
          .filter(|o| o.created_at >= from && o.created_at < to)
          .try_fold((0i64, 0i64), |(sum, count), o| Some((sum.checked_add(o.total_price)?, count + 1)))
      })?
      .ok_or_else(|| AppError::Internal("Monthly sales total overflowed.".to_string()))
  }

  async fn accounts_created_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64> {
    self.read(|d| {
      d.accounts
        .values()
        .filter(|a| a.created_at >= from && a.created_at < to)
        .count() as i64
    })
  }
}

fn spec_from_input(id: i64, input: &CarSpecInput) -> CarSpec {
  CarSpec {
    id,
    brand: input.brand.clone(),
    model: input.model.clone(),
    year: input.year,
    tyre_size: input.tyre_size.clone(),
    car_type: input.car_type,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn uncommitted_writes_are_discarded() {
    let store = MemoryStore::new();
    let account = Account::new("a@tayar.my", false);

    let tx = store.begin().await.unwrap();
    tx.insert_account(&account).await.unwrap();
    tx.rollback().await.unwrap();

    let tx = store.begin().await.unwrap();
    assert!(tx.account(account.id).await.unwrap().is_none());
    tx.insert_account(&account).await.unwrap();
    tx.commit().await.unwrap();

    let tx = store.begin().await.unwrap();
    assert!(tx.account(account.id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn dropped_transaction_releases_the_store() {
    let store = MemoryStore::new();
    {
      let tx = store.begin().await.unwrap();
      tx.insert_account(&Account::new("gone@tayar.my", false)).await.unwrap();
    }
    let tx = store.begin().await.unwrap();
    assert!(tx.list_accounts().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn finished_transaction_rejects_further_use() {
    let store = MemoryStore::new();
    let tx = store.begin().await.unwrap();
    tx.commit().await.unwrap();
    assert!(tx.commit().await.is_err());
    assert!(matches!(tx.list_accounts().await, Err(AppError::Internal(_))));
  }
}
