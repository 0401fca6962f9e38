// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::money::Sen;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tyre {
  pub id: String,
  pub brand_id: String,
  pub description: String,
  pub car_type: String,
  pub image_link: String,
  pub unit_price: Sen,
  pub tyre_size: String,
  pub speed_index: String,
  pub load_index: i32,
  pub stock: i64,
  pub status: String,
  pub created_by: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
  pub id: String,
  pub type_id: String,
  pub description: String,
  pub car_type: String,
  pub unit_price: Sen,
  pub status: String,
  pub created_by: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

/// Anything that can sit in a cart. Only tyres carry stock.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Product {
  Tyre(Tyre),
  Service(Service),
}

impl Product {
  pub fn id(&self) -> &str {
    match self {
      Product::Tyre(t) => &t.id,
      Product::Service(s) => &s.id,
    }
  }

  pub fn description(&self) -> &str {
    match self {
      Product::Tyre(t) => &t.description,
      Product::Service(s) => &s.description,
    }
  }

  pub fn unit_price(&self) -> Sen {
    match self {
      Product::Tyre(t) => t.unit_price,
      Product::Service(s) => s.unit_price,
    }
  }

  /// `None` for services.
  pub fn stock(&self) -> Option<i64> {
    match self {
      Product::Tyre(t) => Some(t.stock),
      Product::Service(_) => None,
    }
  }

  pub fn is_stocked(&self) -> bool {
    matches!(self, Product::Tyre(_))
  }
}
