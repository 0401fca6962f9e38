// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::{AppError, Result};

/// Accounts are issued by the external auth provider; this service only reads
/// them and toggles the admin flag.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
  pub id: Uuid,
  pub email: String,
  pub is_admin: bool,
  pub created_at: DateTime<Utc>,
}

impl Account {
  pub fn new<S: Into<String>>(email: S, is_admin: bool) -> Self {
    Self {
      id: Uuid::new_v4(),
      email: email.into(),
      is_admin,
      created_at: Utc::now(),
    }
  }
}

/// Identity of the caller, resolved once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthClaims {
  pub account_id: Uuid,
  pub is_admin: bool,
}

impl AuthClaims {
  pub fn require_admin(&self) -> Result<()> {
    if self.is_admin {
      Ok(())
    } else {
      Err(AppError::Unauthorized("You are not admin".to_string()))
    }
  }
}
