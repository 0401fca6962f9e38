// src/services/order_service.rs

use serde::Serialize;
use tayar_flow::{ContextData, WorkflowOutcome};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{AuthClaims, Order, OrderDetail};
use crate::state::AppState;
use crate::workflows::contexts::{CheckoutCtxData, CheckoutRequest};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
  pub order_id: Uuid,
  pub appointment_id: Uuid,
  pub total_price: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
  pub order: Order,
  pub details: Vec<OrderDetail>,
}

#[instrument(
  name = "orders::checkout",
  skip(state, claims, request),
  fields(account_id = %claims.account_id, car_id = request.car_id, bay = request.bay)
)]
pub async fn checkout(state: &AppState, claims: &AuthClaims, request: CheckoutRequest) -> Result<CheckoutReceipt> {
  let tx = state.store.begin().await?;
  let ctx = ContextData::new(CheckoutCtxData::new(
    tx.clone(),
    state.config.clone(),
    claims.account_id,
    request,
  ));

  match state.flows.run_atomic(ctx.clone(), tx.as_unit_of_work()).await {
    Ok(WorkflowOutcome::Completed) => {
      let (order_id, appointment_id, total_price) = {
        let guard = ctx.read();
        (guard.order_id, guard.appointment_id, guard.total_price)
      };
      match (order_id, appointment_id) {
        (Some(order_id), Some(appointment_id)) => {
          info!(%order_id, %appointment_id, total_price, "Checkout committed.");
          Ok(CheckoutReceipt {
            order_id,
            appointment_id,
            total_price,
          })
        }
        _ => {
          error!("Checkout completed without order or appointment id.");
          Err(AppError::Internal("Checkout result unavailable.".to_string()))
        }
      }
    }
    Ok(WorkflowOutcome::Stopped) => Err(AppError::Internal("Checkout was halted.".to_string())),
    Err(app_err) => {
      warn!(error = %app_err, "Checkout failed; nothing was persisted.");
      Err(app_err)
    }
  }
}

pub async fn list_orders(state: &AppState, claims: &AuthClaims) -> Result<Vec<Order>> {
  let tx = state.store.begin().await?;
  let orders = tx.orders_for(claims.account_id).await?;
  tx.commit().await?;
  Ok(orders)
}

/// Owners and admins only.
pub async fn order_detail(state: &AppState, claims: &AuthClaims, order_id: Uuid) -> Result<OrderWithDetails> {
  let tx = state.store.begin().await?;
  let order = tx
    .order(order_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
  if order.account_id != claims.account_id && !claims.is_admin {
    warn!(%order_id, caller = %claims.account_id, "Order belongs to another account.");
    return Err(AppError::Unauthorized("Order belongs to another account".to_string()));
  }
  let details = tx.order_details(order_id).await?;
  tx.commit().await?;
  Ok(OrderWithDetails { order, details })
}
