// src/services/cart_service.rs

//! Cart operations for the calling account. Adds and quantity changes run as
//! workflows because they touch tyre stock; the rest are single statements.

use tayar_flow::{ContextData, WorkflowOutcome};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{AuthClaims, CartLine};
use crate::state::AppState;
use crate::workflows::contexts::{AddItemCtxData, UpdateQuantityCtxData};

#[instrument(name = "cart::add_item", skip(state, claims), fields(account_id = %claims.account_id))]
pub async fn add_item(state: &AppState, claims: &AuthClaims, product_id: &str, quantity: i64) -> Result<CartLine> {
  let tx = state.store.begin().await?;
  let ctx = ContextData::new(AddItemCtxData::new(
    tx.clone(),
    claims.account_id,
    product_id.to_string(),
    quantity,
  ));

  match state.flows.run_atomic(ctx.clone(), tx.as_unit_of_work()).await {
    Ok(WorkflowOutcome::Completed) => {
      let line = { ctx.read().result_line.clone() };
      line.ok_or_else(|| AppError::Internal("Cart line unavailable after add.".to_string()))
    }
    Ok(WorkflowOutcome::Stopped) => Err(AppError::Internal("Adding to cart was halted.".to_string())),
    Err(app_err) => {
      warn!(error = %app_err, "Add item workflow failed.");
      Err(app_err)
    }
  }
}

#[instrument(name = "cart::update_quantity", skip(state, claims), fields(account_id = %claims.account_id))]
pub async fn update_quantity(
  state: &AppState,
  claims: &AuthClaims,
  product_id: &str,
  new_quantity: i64,
) -> Result<CartLine> {
  let tx = state.store.begin().await?;
  let ctx = ContextData::new(UpdateQuantityCtxData::new(
    tx.clone(),
    claims.account_id,
    product_id.to_string(),
    new_quantity,
  ));

  match state.flows.run_atomic(ctx.clone(), tx.as_unit_of_work()).await {
    Ok(WorkflowOutcome::Completed) => {
      let line = { ctx.read().result_line.clone() };
      line.ok_or_else(|| AppError::Internal("Cart line unavailable after update.".to_string()))
    }
    Ok(WorkflowOutcome::Stopped) => Err(AppError::Internal("Quantity update was halted.".to_string())),
    Err(app_err) => {
      warn!(error = %app_err, "Update quantity workflow failed.");
      Err(app_err)
    }
  }
}

/// Deletes a line. Reserved tyre stock stays reserved.
pub async fn remove_item(state: &AppState, claims: &AuthClaims, product_id: &str) -> Result<()> {
  let tx = state.store.begin().await?;
  if !tx.delete_cart_line(claims.account_id, product_id).await? {
    tx.rollback().await?;
    return Err(AppError::NotFound("Cart item not found".to_string()));
  }
  tx.commit().await?;
  info!(account_id = %claims.account_id, %product_id, "Cart line removed.");
  Ok(())
}

pub async fn clear(state: &AppState, claims: &AuthClaims) -> Result<u64> {
  let tx = state.store.begin().await?;
  let removed = tx.clear_cart(claims.account_id).await?;
  tx.commit().await?;
  info!(account_id = %claims.account_id, removed, "Cart cleared.");
  Ok(removed)
}

pub async fn list_items(state: &AppState, claims: &AuthClaims) -> Result<Vec<CartLine>> {
  let tx = state.store.begin().await?;
  let lines = tx.cart_lines(claims.account_id).await?;
  tx.commit().await?;
  Ok(lines)
}

/// Admin lookup of any account's line for one product.
pub async fn find_lines(
  state: &AppState,
  claims: &AuthClaims,
  account_id: Uuid,
  product_id: &str,
) -> Result<Vec<CartLine>> {
  claims.require_admin()?;
  let tx = state.store.begin().await?;
  let line = tx.cart_line(account_id, product_id).await?;
  tx.commit().await?;
  Ok(line.into_iter().collect())
}
