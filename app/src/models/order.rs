// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

use super::money::Sen;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "payment_method_enum")]
pub enum PaymentMethod {
  #[default]
  Cash,
  Card,
  #[serde(rename = "E-Wallet")]
  #[sqlx(rename = "E-Wallet")]
  EWallet,
}

/// Order header. Only `appointment_id` changes after insert.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub account_id: Uuid,
  pub total_price: Sen,
  pub payment_method: PaymentMethod,
  pub appointment_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
  pub order_id: Uuid,
  pub product_id: String,
  pub quantity: i64,
  pub unit_price: Sen,
  pub car_id: i64,
  pub total_price: Sen,
}
