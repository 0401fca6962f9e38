// src/web/handlers/car_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::models::{AuthClaims, CarSpecInput};
use crate::services::vehicles::{self, RegisterCarInput};
use crate::state::AppState;

pub async fn list_specs_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let specs = vehicles::list_specs(&app_state).await?;
  Ok(HttpResponse::Ok().json(json!({ "carSpecs": specs })))
}

pub async fn get_spec_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  let spec = vehicles::get_spec(&app_state, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(spec))
}

#[instrument(name = "handler::create_car_spec", skip(app_state, payload))]
pub async fn create_spec_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CarSpecInput>,
) -> Result<HttpResponse, AppError> {
  let spec = vehicles::create_spec(&app_state, payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(spec))
}

#[instrument(name = "handler::update_car_spec", skip(app_state, payload))]
pub async fn update_spec_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<CarSpecInput>,
) -> Result<HttpResponse, AppError> {
  let spec = vehicles::update_spec(&app_state, path.into_inner(), payload.into_inner()).await?;
  Ok(HttpResponse::Ok().json(spec))
}

#[instrument(name = "handler::delete_car_spec", skip(app_state))]
pub async fn delete_spec_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  vehicles::delete_spec(&app_state, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Car deleted successfully." })))
}

pub async fn list_cars_handler(app_state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
  let cars = vehicles::list_cars(&app_state, &claims).await?;
  Ok(HttpResponse::Ok().json(json!({ "cars": cars })))
}

#[instrument(name = "handler::register_car", skip(app_state, claims, payload), fields(account_id = %claims.account_id))]
pub async fn register_car_handler(
  app_state: web::Data<AppState>,
  claims: AuthClaims,
  payload: web::Json<RegisterCarInput>,
) -> Result<HttpResponse, AppError> {
  let car = vehicles::register_car(&app_state, &claims, payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(json!({
    "message": "Car registered successfully.",
    "car": car
  })))
}
