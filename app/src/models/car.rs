// src/models/car.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "car_type_enum")]
pub enum CarType {
  #[serde(rename = "SUV")]
  #[sqlx(rename = "SUV")]
  Suv,
  Passenger,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarSpec {
  pub id: i64,
  pub brand: String,
  pub model: String,
  pub year: i32,
  pub tyre_size: String,
  pub car_type: CarType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSpecInput {
  pub brand: String,
  pub model: String,
  pub year: i32,
  pub tyre_size: String,
  pub car_type: CarType,
}

/// A car registered to an account. Checkout refers to it by `id`.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCar {
  pub id: i64,
  pub account_id: Uuid,
  pub car_spec_id: i64,
  pub plate_number: String,
  pub created_at: DateTime<Utc>,
}
