// src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AuthClaims, PaymentMethod};
use crate::services::order_service;
use crate::state::AppState;
use crate::workflows::contexts::CheckoutRequest;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
  pub car_id: i64,
  pub bay: i32,
  /// `YYYY-MM-DD`
  pub appointment_date: String,
  /// `HH:MM`, seconds optional.
  pub appointment_time: String,
  #[serde(default)]
  pub payment_method: PaymentMethod,
}

impl CheckoutPayload {
  fn into_request(self) -> Result<CheckoutRequest, AppError> {
    Ok(CheckoutRequest {
      car_id: self.car_id,
      bay: self.bay,
      scheduled_at: parse_slot(&self.appointment_date, &self.appointment_time)?,
      payment_method: self.payment_method,
    })
  }
}

fn parse_slot(date: &str, time: &str) -> Result<NaiveDateTime, AppError> {
  let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
    .map_err(|_| AppError::Validation("Appointment date must be YYYY-MM-DD".to_string()))?;
  let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
    .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
    .map_err(|_| AppError::Validation("Appointment time must be HH:MM".to_string()))?;
  Ok(date.and_time(time))
}

#[instrument(name = "handler::checkout", skip(app_state, claims, payload), fields(account_id = %claims.account_id))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  payload: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, AppError> {
  let request = payload.into_inner().into_request()?;
  let receipt = order_service::checkout(&app_state, &claims, request).await?;
  info!(order_id = %receipt.order_id, "Checkout succeeded.");
  Ok(HttpResponse::Ok().json(json!({
    "message": "Order placed successfully.",
    "orderId": receipt.order_id,
    "appointmentId": receipt.appointment_id,
    "totalPrice": receipt.total_price
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, claims), fields(account_id = %claims.account_id))]
pub async fn list_orders_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let orders = order_service::list_orders(&app_state, &claims).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(name = "handler::get_order", skip(app_state, claims, path), fields(order_id = %*path))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order = order_service::order_detail(&app_state, &claims, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_slot_with_and_without_seconds() {
    let a = parse_slot("2025-03-14", "09:30").unwrap();
    let b = parse_slot("2025-03-14", "09:30:00").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.format("%Y-%m-%d %H:%M").to_string(), "2025-03-14 09:30");
  }

  #[test]
  fn rejects_malformed_slot() {
    assert!(matches!(parse_slot("14/03/2025", "09:30"), Err(AppError::Validation(_))));
    assert!(matches!(parse_slot("2025-03-14", "9.30am"), Err(AppError::Validation(_))));
  }
}
