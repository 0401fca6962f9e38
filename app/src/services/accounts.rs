// src/services/accounts.rs

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{Account, AuthClaims};
use crate::state::AppState;

/// Resolves the caller's claims from the account record.
pub async fn claims_for(state: &AppState, account_id: Uuid) -> Result<AuthClaims> {
  let tx = state.store.begin().await?;
  let account = tx.account(account_id).await?;
  tx.commit().await?;
  match account {
    Some(a) => Ok(AuthClaims {
      account_id: a.id,
      is_admin: a.is_admin,
    }),
    None => {
      warn!(%account_id, "Unknown account in request.");
      Err(AppError::Unauthenticated("Unknown account".to_string()))
    }
  }
}

pub async fn list_accounts(state: &AppState, claims: &AuthClaims) -> Result<Vec<Account>> {
  claims.require_admin()?;
  let tx = state.store.begin().await?;
  let accounts = tx.list_accounts().await?;
  tx.commit().await?;
  Ok(accounts)
}

pub async fn set_admin(state: &AppState, claims: &AuthClaims, account_id: Uuid, is_admin: bool) -> Result<()> {
  claims.require_admin()?;
  let tx = state.store.begin().await?;
  if !tx.set_admin(account_id, is_admin).await? {
    return Err(AppError::NotFound("Account not found".to_string()));
  }
  tx.commit().await?;
  info!(%account_id, is_admin, granted_by = %claims.account_id, "Admin rights changed.");
  Ok(())
}
