// src/web/handlers/admin_handlers.rs

//! Admin-only routes. Every service call here checks `AuthClaims::require_admin`.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::AuthClaims;
use crate::services::{accounts, notifications, reporting};
use crate::state::AppState;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminPayload {
  pub is_admin: bool,
}

pub async fn list_accounts_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let accounts = accounts::list_accounts(&app_state, &claims).await?;
  Ok(HttpResponse::Ok().json(json!({ "accounts": accounts })))
}

#[instrument(name = "handler::set_admin", skip(app_state, claims, payload), fields(target = %*path))]
pub async fn set_admin_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  path: web::Path<Uuid>,
  payload: web::Json<SetAdminPayload>,
) -> Result<HttpResponse, AppError> {
  let account_id = path.into_inner();
  accounts::set_admin(&app_state, &claims, account_id, payload.is_admin).await?;
  let message = if payload.is_admin {
    "Admin rights granted."
  } else {
    "Admin rights removed."
  };
  Ok(HttpResponse::Ok().json(json!({ "message": message, "accountId": account_id })))
}

pub async fn notifications_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let feed = notifications::recent(&app_state, &claims).await?;
  Ok(HttpResponse::Ok().json(json!({ "notifications": feed })))
}

#[instrument(name = "handler::sales_and_orders", skip(app_state, claims))]
pub async fn sales_and_orders_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  let buckets = reporting::sales_and_orders(&app_state, &claims, Utc::now().date_naive()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "months": buckets.iter().map(|b| b.label.as_str()).collect::<Vec<_>>(),
    "sales": buckets.iter().map(|b| b.total_sales).collect::<Vec<_>>(),
    "orders": buckets.iter().map(|b| b.order_count).collect::<Vec<_>>(),
    "buckets": buckets
  })))
}

#[instrument(name = "handler::registered_users", skip(app_state, claims))]
pub async fn registered_users_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  let counts = reporting::registered_users(&app_state, &claims, Utc::now().date_naive()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "months": counts.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
    "registeredUsers": counts.iter().map(|c| c.count).collect::<Vec<_>>()
  })))
}

#[instrument(name = "handler::order_statistics", skip(app_state, claims))]
pub async fn order_statistics_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
  let counts = reporting::order_statistics(&app_state, &claims, Utc::now().date_naive()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "months": counts.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
    "orders": counts.iter().map(|c| c.count).collect::<Vec<_>>()
  })))
}

#[instrument(name = "handler::dashboard", skip(app_state, claims))]
pub async fn dashboard_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let dashboard = reporting::dashboard(&app_state, &claims, Utc::now().date_naive()).await?;
  Ok(HttpResponse::Ok().json(dashboard))
}
