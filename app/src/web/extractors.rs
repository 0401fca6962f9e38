// src/web/extractors.rs

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::AuthClaims;
use crate::services::accounts;
use crate::state::AppState;

/// Header set by the upstream auth provider once it has verified the caller.
pub const ACCOUNT_HEADER: &str = "X-Account-ID";

impl FromRequest for AuthClaims {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let account_id = req
      .headers()
      .get(ACCOUNT_HEADER)
      .and_then(|v| v.to_str().ok())
      .and_then(|s| Uuid::parse_str(s.trim()).ok());
    let state = req.app_data::<web::Data<AppState>>().cloned();

    Box::pin(async move {
      let account_id = account_id.ok_or_else(|| {
        warn!("Missing or invalid {} header.", ACCOUNT_HEADER);
        AppError::Unauthenticated("Authentication required".to_string())
      })?;
      let state = state.ok_or_else(|| AppError::Internal("Application state not configured.".to_string()))?;
      accounts::claims_for(&state, account_id).await
    })
  }
}
