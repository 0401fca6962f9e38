// src/services/vehicles.rs

use serde::Deserialize;
use tracing::info;

use super::validation::{model_year, short_text, text_length};
use crate::errors::{AppError, Result};
use crate::models::{AuthClaims, CarSpec, CarSpecInput, RegisteredCar};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCarInput {
  pub car_spec_id: i64,
  pub plate_number: String,
}

fn validate_spec(input: &CarSpecInput) -> Result<()> {
  short_text("Brand", &input.brand)?;
  short_text("Model", &input.model)?;
  short_text("Tyre size", &input.tyre_size)?;
  model_year(input.year)
}

pub async fn list_specs(state: &AppState) -> Result<Vec<CarSpec>> {
  let tx = state.store.begin().await?;
  let specs = tx.car_specs().await?;
  tx.commit().await?;
  Ok(specs)
}

pub async fn get_spec(state: &AppState, id: i64) -> Result<CarSpec> {
  let tx = state.store.begin().await?;
  let spec = tx.car_spec(id).await?;
  tx.commit().await?;
  spec.ok_or_else(|| AppError::NotFound("Car not found".to_string()))
}

pub async fn create_spec(state: &AppState, input: CarSpecInput) -> Result<CarSpec> {
  validate_spec(&input)?;
  let tx = state.store.begin().await?;
  let spec = tx.insert_car_spec(&input).await?;
  tx.commit().await?;
  info!(car_spec_id = spec.id, "Car spec created.");
  Ok(spec)
}

pub async fn update_spec(state: &AppState, id: i64, input: CarSpecInput) -> Result<CarSpec> {
  validate_spec(&input)?;
  let tx = state.store.begin().await?;
  let spec = tx
    .update_car_spec(id, &input)
    .await?
    .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
  tx.commit().await?;
  Ok(spec)
}

pub async fn delete_spec(state: &AppState, id: i64) -> Result<()> {
  let tx = state.store.begin().await?;
  if !tx.delete_car_spec(id).await? {
    return Err(AppError::NotFound("Car not found".to_string()));
  }
  tx.commit().await?;
  info!(car_spec_id = id, "Car spec deleted.");
  Ok(())
}

pub async fn register_car(state: &AppState, claims: &AuthClaims, input: RegisterCarInput) -> Result<RegisteredCar> {
  text_length("Plate number", &input.plate_number, 1, 20)?;
  let tx = state.store.begin().await?;
  if tx.car_spec(input.car_spec_id).await?.is_none() {
    return Err(AppError::NotFound("Car spec not found".to_string()));
  }
  let car = tx
    .insert_registered_car(claims.account_id, input.car_spec_id, input.plate_number.trim())
    .await?;
  tx.commit().await?;
  info!(car_id = car.id, account_id = %claims.account_id, "Car registered.");
  Ok(car)
}

pub async fn list_cars(state: &AppState, claims: &AuthClaims) -> Result<Vec<RegisteredCar>> {
  let tx = state.store.begin().await?;
  let cars = tx.cars_for(claims.account_id).await?;
  tx.commit().await?;
  Ok(cars)
}
