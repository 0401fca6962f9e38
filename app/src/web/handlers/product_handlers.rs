// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::AuthClaims;
use crate::services::catalog::{self, ServiceInput, TyreInput};
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::list_products(&app_state).await?;
  info!("Fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(json!({
    "message": "Products fetched successfully.",
    "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product = catalog::get_product(&app_state, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": "Product fetched successfully.",
    "product": product
  })))
}

#[instrument(name = "handler::add_tyre", skip(app_state, claims, payload), fields(tyre_id = %payload.id))]
pub async fn add_tyre_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  payload: web::Json<TyreInput>,
) -> Result<HttpResponse, AppError> {
  let tyre = catalog::add_tyre(&app_state, &claims, payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(json!({
    "message": "Tyre added successfully.",
    "tyre": tyre
  })))
}

#[instrument(name = "handler::update_tyre", skip(app_state, claims, payload), fields(tyre_id = %payload.id))]
pub async fn update_tyre_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  payload: web::Json<TyreInput>,
) -> Result<HttpResponse, AppError> {
  let tyre = catalog::update_tyre(&app_state, &claims, payload.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": "Tyre updated successfully.",
    "tyre": tyre
  })))
}

#[instrument(name = "handler::add_service", skip(app_state, claims, payload), fields(service_id = %payload.id))]
pub async fn add_service_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  payload: web::Json<ServiceInput>,
) -> Result<HttpResponse, AppError> {
  let service = catalog::add_service(&app_state, &claims, payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(json!({
    "message": "Service added successfully.",
    "service": service
  })))
}

#[instrument(name = "handler::update_service", skip(app_state, claims, payload), fields(service_id = %payload.id))]
pub async fn update_service_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  payload: web::Json<ServiceInput>,
) -> Result<HttpResponse, AppError> {
  let service = catalog::update_service(&app_state, &claims, payload.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": "Service updated successfully.",
    "service": service
  })))
}
