// src/services/validation.rs

use crate::errors::{AppError, Result};

pub fn text_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
  let len = value.trim().chars().count();
  if len < min || len > max {
    return Err(AppError::Validation(format!(
      "{} must be between {} and {} characters",
      field, min, max
    )));
  }
  Ok(())
}

/// Catalog and vehicle text fields: 3 to 50 characters.
pub fn short_text(field: &str, value: &str) -> Result<()> {
  text_length(field, value, 3, 50)
}

pub fn positive(field: &str, value: i64) -> Result<()> {
  if value <= 0 {
    return Err(AppError::Validation(format!("{} must be greater than zero", field)));
  }
  Ok(())
}

pub fn model_year(year: i32) -> Result<()> {
  if year <= 1800 || year >= 2100 {
    return Err(AppError::Validation("Year must be between 1801 and 2099".to_string()));
  }
  Ok(())
}
