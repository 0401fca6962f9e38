// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

use tayarpro::config::AppConfig;
use tayarpro::models::{Account, AuthClaims, CarSpecInput, CarType, PaymentMethod, Product, Service, Tyre};
use tayarpro::state::AppState;
use tayarpro::store::{MemoryStore, ShopStore};
use tayarpro::workflows::contexts::CheckoutRequest;

pub const TYRE_ID: &str = "T1";
pub const SERVICE_ID: &str = "S1";
pub const TYRE_PRICE: i64 = 100;
pub const SERVICE_PRICE: i64 = 50;
pub const TYRE_STOCK: i64 = 10;

static TRACING: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

/// An in-memory shop with one admin, two customers, one tyre, one service and a
/// car registered to each customer.
pub struct Shop {
  pub store: MemoryStore,
  pub state: AppState,
  pub admin: AuthClaims,
  pub customer: AuthClaims,
  pub customer_email: String,
  pub other: AuthClaims,
  pub car_id: i64,
  pub other_car_id: i64,
}

pub async fn shop() -> Shop {
  shop_with(AppConfig::in_memory()).await
}

pub async fn shop_with(config: AppConfig) -> Shop {
  setup_tracing();
  let store = MemoryStore::new();

  let admin = Account::new("admin@tayar.my", true);
  let customer = Account::new("ali@tayar.my", false);
  let other = Account::new("siti@tayar.my", false);

  let tx = store.begin().await.unwrap();
  for account in [&admin, &customer, &other] {
    tx.insert_account(account).await.unwrap();
  }
  tx.insert_tyre(&Tyre {
    id: TYRE_ID.to_string(),
    brand_id: "MICH".to_string(),
    description: "Michelin Primacy 4".to_string(),
    car_type: "Passenger".to_string(),
    image_link: "/images/t1.png".to_string(),
    unit_price: TYRE_PRICE,
    tyre_size: "205/55R16".to_string(),
    speed_index: "V".to_string(),
    load_index: 91,
    stock: TYRE_STOCK,
    status: "Active".to_string(),
    created_by: Some(admin.id),
    created_at: Utc::now(),
  })
  .await
  .unwrap();
  tx.insert_service(&Service {
    id: SERVICE_ID.to_string(),
    type_id: "ALIGN".to_string(),
    description: "Wheel alignment".to_string(),
    car_type: "All".to_string(),
    unit_price: SERVICE_PRICE,
    status: "Active".to_string(),
    created_by: Some(admin.id),
    created_at: Utc::now(),
  })
  .await
  .unwrap();
  let spec = tx
    .insert_car_spec(&CarSpecInput {
      brand: "Perodua".to_string(),
      model: "Myvi".to_string(),
      year: 2022,
      tyre_size: "185/55R15".to_string(),
      car_type: CarType::Passenger,
    })
    .await
    .unwrap();
  let car = tx.insert_registered_car(customer.id, spec.id, "WXY 1234").await.unwrap();
  let other_car = tx.insert_registered_car(other.id, spec.id, "JHB 9876").await.unwrap();
  tx.commit().await.unwrap();

  let state = AppState::new(Arc::new(store.clone()), Arc::new(config));
  Shop {
    store,
    state,
    admin: claims(&admin),
    customer: claims(&customer),
    customer_email: customer.email.clone(),
    other: claims(&other),
    car_id: car.id,
    other_car_id: other_car.id,
  }
}

fn claims(account: &Account) -> AuthClaims {
  AuthClaims {
    account_id: account.id,
    is_admin: account.is_admin,
  }
}

pub fn slot(date: &str, time: &str) -> NaiveDateTime {
  NaiveDate::parse_from_str(date, "%Y-%m-%d")
    .unwrap()
    .and_time(chrono::NaiveTime::parse_from_str(time, "%H:%M").unwrap())
}

pub fn checkout_request(car_id: i64) -> CheckoutRequest {
  CheckoutRequest {
    car_id,
    bay: 2,
    scheduled_at: slot("2025-03-14", "10:00"),
    payment_method: PaymentMethod::Card,
  }
}

impl Shop {
  pub async fn stock(&self, product_id: &str) -> i64 {
    let tx = self.store.begin().await.unwrap();
    let product = tx.product(product_id).await.unwrap();
    tx.commit().await.unwrap();
    match product {
      Some(Product::Tyre(t)) => t.stock,
      other => panic!("{} is not a tyre: {:?}", product_id, other),
    }
  }
}
