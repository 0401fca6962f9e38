// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{cart_total, AuthClaims};
use crate::services::cart_service;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
  pub product_id: String,
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FindLinesQuery {
  pub account_id: Uuid,
  pub product_id: String,
}

#[instrument(name = "handler::list_cart", skip(app_state, claims), fields(account_id = %claims.account_id))]
pub async fn list_cart_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let items = cart_service::list_items(&app_state, &claims).await?;
  let total = cart_total(&items).ok_or_else(|| AppError::Validation("Cart total is too large".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({
    "items": items,
    "totalPrice": total
  })))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, payload, claims),
  fields(account_id = %claims.account_id, product_id = %payload.product_id, quantity = %payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddItemPayload>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  let line = cart_service::add_item(&app_state, &claims, &payload.product_id, payload.quantity).await?;
  info!(quantity = line.quantity, "Item added to cart.");
  Ok(HttpResponse::Ok().json(json!({
    "message": "Item added to cart successfully.",
    "cartItem": line
  })))
}

#[instrument(name = "handler::update_cart_item", skip(app_state, path, payload, claims), fields(account_id = %claims.account_id))]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<UpdateQuantityPayload>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  let line = cart_service::update_quantity(&app_state, &claims, &path.into_inner(), payload.quantity).await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": "Cart item updated successfully.",
    "cartItem": line
  })))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path, claims), fields(account_id = %claims.account_id))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  cart_service::remove_item(&app_state, &claims, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Item removed from cart." })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, claims), fields(account_id = %claims.account_id))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let removed = cart_service::clear(&app_state, &claims).await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": "Cart cleared.",
    "removed": removed
  })))
}

pub async fn find_cart_lines_handler(
  app_state: web::Data<AppState>,
  query: web::Query<FindLinesQuery>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  let query = query.into_inner();
  let lines = cart_service::find_lines(&app_state, &claims, query.account_id, &query.product_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "items": lines })))
}
