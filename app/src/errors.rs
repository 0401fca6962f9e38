// src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use tayar_flow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Unauthenticated: {0}")]
  Unauthenticated(String),

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Car not found: {0}")]
  CarNotFound(String),

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
  InsufficientStock {
    product_id: String,
    requested: i64,
    available: i64,
  },

  #[error("Cart is empty")]
  EmptyCart,

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Unit-of-work commit/rollback failures arrive as anyhow errors.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    let err = match err.downcast::<AppError>() {
      Ok(app_err) => return app_err,
      Err(other) => other,
    };
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl AppError {
  /// Message safe to hand back to clients.
  fn public_message(&self) -> String {
    match self {
      AppError::Unauthenticated(m)
      | AppError::Unauthorized(m)
      | AppError::NotFound(m)
      | AppError::CarNotFound(m)
      | AppError::Validation(m)
      | AppError::Conflict(m) => m.clone(),
      AppError::InsufficientStock { .. } => "Insufficient stock".to_string(),
      AppError::EmptyCart => "Cart is empty".to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Sqlx(_) => "Database operation failed".to_string(),
      AppError::Workflow { .. } => "Workflow processing error".to_string(),
      AppError::Internal(_) => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Unauthenticated(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) | AppError::CarNotFound(_) => StatusCode::NOT_FOUND,
      AppError::Validation(_) | AppError::InsufficientStock { .. } | AppError::EmptyCart | AppError::Conflict(_) => {
        StatusCode::BAD_REQUEST
      }
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with server error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }

    match self {
      AppError::InsufficientStock {
        product_id,
        requested,
        available,
      } => HttpResponse::build(status).json(json!({
        "error": self.public_message(),
        "productId": product_id,
        "requested": requested,
        "available": available,
      })),
      _ => HttpResponse::build(status).json(json!({ "error": self.public_message() })),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_domain_errors_to_status_codes() {
    assert_eq!(AppError::EmptyCart.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::Conflict("bay taken".into()).status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::CarNotFound("7".into()).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::Unauthorized("admin".into()).status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      AppError::Workflow {
        source: FlowError::Internal("x".into())
      }
      .status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn anyhow_round_trip_keeps_app_error() {
    let wrapped = anyhow::Error::new(AppError::NotFound("Order not found".into()));
    assert!(matches!(AppError::from(wrapped), AppError::NotFound(m) if m == "Order not found"));

    let opaque = anyhow::anyhow!("socket closed");
    assert!(matches!(AppError::from(opaque), AppError::Internal(m) if m == "socket closed"));
  }
}
