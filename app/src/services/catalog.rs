// src/services/catalog.rs

//! Tyres and services. Reads are public; writes need an admin.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use super::validation::{positive, short_text};
use crate::errors::{AppError, Result};
use crate::models::{AuthClaims, Product, Service, Tyre};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreInput {
  pub id: String,
  pub brand_id: String,
  pub description: String,
  pub car_type: String,
  pub image_link: String,
  pub unit_price: i64,
  pub tyre_size: String,
  pub speed_index: String,
  pub load_index: i32,
  pub stock: i64,
  #[serde(default = "active_status")]
  pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
  pub id: String,
  pub type_id: String,
  pub description: String,
  pub car_type: String,
  pub unit_price: i64,
  #[serde(default = "active_status")]
  pub status: String,
}

fn active_status() -> String {
  "Active".to_string()
}

impl TyreInput {
  fn validate(&self) -> Result<()> {
    short_text("Item ID", &self.id)?;
    short_text("Brand ID", &self.brand_id)?;
    short_text("Description", &self.description)?;
    positive("Unit price", self.unit_price)?;
    positive("Stock", self.stock)?;
    positive("Load index", i64::from(self.load_index))?;
    Ok(())
  }

  fn into_tyre(self, created_by: Option<uuid::Uuid>) -> Tyre {
    Tyre {
      id: self.id,
      brand_id: self.brand_id,
      description: self.description,
      car_type: self.car_type,
      image_link: self.image_link,
      unit_price: self.unit_price,
      tyre_size: self.tyre_size,
      speed_index: self.speed_index,
      load_index: self.load_index,
      stock: self.stock,
      status: self.status,
      created_by,
      created_at: Utc::now(),
    }
  }
}

impl ServiceInput {
  fn validate(&self) -> Result<()> {
    short_text("Service ID", &self.id)?;
    short_text("Type ID", &self.type_id)?;
    short_text("Description", &self.description)?;
    positive("Unit price", self.unit_price)?;
    Ok(())
  }

  fn into_service(self, created_by: Option<uuid::Uuid>) -> Service {
    Service {
      id: self.id,
      type_id: self.type_id,
      description: self.description,
      car_type: self.car_type,
      unit_price: self.unit_price,
      status: self.status,
      created_by,
      created_at: Utc::now(),
    }
  }
}

#[instrument(name = "catalog::add_tyre", skip(state, claims, input), fields(tyre_id = %input.id))]
pub async fn add_tyre(state: &AppState, claims: &AuthClaims, input: TyreInput) -> Result<Tyre> {
  claims.require_admin()?;
  input.validate()?;
  let tyre = input.into_tyre(Some(claims.account_id));

  let tx = state.store.begin().await?;
  tx.insert_tyre(&tyre).await?;
  tx.commit().await?;
  info!("Tyre added to catalog.");
  Ok(tyre)
}

#[instrument(name = "catalog::add_service", skip(state, claims, input), fields(service_id = %input.id))]
pub async fn add_service(state: &AppState, claims: &AuthClaims, input: ServiceInput) -> Result<Service> {
  claims.require_admin()?;
  input.validate()?;
  let service = input.into_service(Some(claims.account_id));

  let tx = state.store.begin().await?;
  tx.insert_service(&service).await?;
  tx.commit().await?;
  info!("Service added to catalog.");
  Ok(service)
}

/// Replaces every editable field. Creator and creation time are kept.
pub async fn update_tyre(state: &AppState, claims: &AuthClaims, input: TyreInput) -> Result<Tyre> {
  claims.require_admin()?;
  input.validate()?;

  let tx = state.store.begin().await?;
  let existing = match tx.product(&input.id).await? {
    Some(Product::Tyre(t)) => t,
    _ => return Err(AppError::NotFound("Tyre not found".to_string())),
  };
  let tyre = Tyre {
    created_by: existing.created_by,
    created_at: existing.created_at,
    ..input.into_tyre(None)
  };
  if !tx.update_tyre(&tyre).await? {
    return Err(AppError::NotFound("Tyre not found".to_string()));
  }
  tx.commit().await?;
  Ok(tyre)
}

pub async fn update_service(state: &AppState, claims: &AuthClaims, input: ServiceInput) -> Result<Service> {
  claims.require_admin()?;
  input.validate()?;

  let tx = state.store.begin().await?;
  let existing = match tx.product(&input.id).await? {
    Some(Product::Service(s)) => s,
    _ => return Err(AppError::NotFound("Service not found".to_string())),
  };
  let service = Service {
    created_by: existing.created_by,
    created_at: existing.created_at,
    ..input.into_service(None)
  };
  if !tx.update_service(&service).await? {
    return Err(AppError::NotFound("Service not found".to_string()));
  }
  tx.commit().await?;
  Ok(service)
}

pub async fn list_products(state: &AppState) -> Result<Vec<Product>> {
  let tx = state.store.begin().await?;
  let products = tx.list_products().await?;
  tx.commit().await?;
  Ok(products)
}

pub async fn get_product(state: &AppState, product_id: &str) -> Result<Product> {
  let tx = state.store.begin().await?;
  let product = tx.product(product_id).await?;
  tx.commit().await?;
  product.ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
