// src/workflows/checkout_workflow.rs

//! Cart to order, in one unit of work: header, detail lines, empty cart,
//! appointment, then a notification. A failure at any step rolls all of it back.

use chrono::Utc;
use tayar_flow::{ContextData, StepControl, Workflow, WorkflowRegistry};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::money::{format_rm, line_total};
use crate::models::{cart_total, NewNotification, Order, OrderDetail};
use crate::services::{appointments, notifications};
use crate::workflows::contexts::CheckoutCtxData;

pub fn register_checkout_workflow(registry: &WorkflowRegistry<AppError>) {
  let mut w = Workflow::<CheckoutCtxData, AppError>::named(
    "checkout",
    &[
      ("load_cart", false, None),
      ("verify_car", false, None),
      ("validate_bay", false, None),
      ("create_order", false, None),
      ("write_order_details", false, None),
      ("clear_cart", false, None),
      ("schedule_appointment", false, None),
      ("emit_notification", false, None),
    ],
  );

  w.on("load_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, account_id) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.account_id)
      };

      let lines = tx.cart_lines(account_id).await?;
      if lines.is_empty() {
        warn!(%account_id, "Checkout: cart is empty.");
        return Err(AppError::EmptyCart);
      }
      let account = tx
        .account(account_id)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("Account not found".to_string()))?;

      {
        let mut guard = ctx_data.write();
        guard.lines = lines;
        guard.account_email = Some(account.email);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("verify_car", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, account_id, car_id) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.account_id, guard.request.car_id)
      };

      match tx.registered_car(car_id).await? {
        Some(car) if car.account_id == account_id => Ok::<_, AppError>(StepControl::Continue),
        _ => {
          warn!(%account_id, car_id, "Checkout: car is not registered to this account.");
          Err(AppError::CarNotFound(format!("Car {} is not registered to this account", car_id)))
        }
      }
    })
  });

  // Runs after the cart and car checks so an empty cart or foreign car is reported first.
  w.on("validate_bay", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (bay, bay_count) = {
        let guard = ctx_data.read();
        (guard.request.bay, guard.config.bay_count)
      };
      if !(1..=bay_count).contains(&bay) {
        warn!(bay, bay_count, "Checkout: bay out of range.");
        return Err(AppError::Validation(format!("Bay must be between 1 and {}", bay_count)));
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("create_order", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, account_id, payment_method, total_price) = {
        let guard = ctx_data.read();
        let total =
          cart_total(&guard.lines).ok_or_else(|| AppError::Validation("Order total is too large".to_string()))?;
        (guard.tx.clone(), guard.account_id, guard.request.payment_method, total)
      };

      let order = Order {
        id: Uuid::new_v4(),
        account_id,
        total_price,
        payment_method,
        appointment_id: None,
        created_at: Utc::now(),
      };
      tx.insert_order(&order).await?;
      info!(order_id = %order.id, total = %format_rm(total_price), "Checkout: order header created.");

      {
        let mut guard = ctx_data.write();
        guard.order_id = Some(order.id);
        guard.total_price = total_price;
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("write_order_details", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, order_id, car_id, lines) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.order_id, guard.request.car_id, guard.lines.clone())
      };
      let order_id = order_id.ok_or_else(|| AppError::Internal("Order id missing before details.".to_string()))?;

      for line in &lines {
        let detail = OrderDetail {
          order_id,
          product_id: line.product_id.clone(),
          quantity: line.quantity,
          unit_price: line.unit_price,
          car_id,
          total_price: line_total(line.unit_price, line.quantity)
            .ok_or_else(|| AppError::Validation("Line total is too large".to_string()))?,
        };
        tx.insert_order_detail(&detail).await?;
      }
      info!(%order_id, lines = lines.len(), "Checkout: order details written.");
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("clear_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, account_id) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.account_id)
      };
      let removed = tx.clear_cart(account_id).await?;
      info!(%account_id, removed, "Checkout: cart cleared.");
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("schedule_appointment", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, config, account_id, request, order_id) = {
        let guard = ctx_data.read();
        (
          guard.tx.clone(),
          guard.config.clone(),
          guard.account_id,
          guard.request.clone(),
          guard.order_id,
        )
      };
      let order_id = order_id.ok_or_else(|| AppError::Internal("Order id missing before scheduling.".to_string()))?;

      let appointment = appointments::schedule(
        tx.as_ref(),
        &config,
        account_id,
        request.car_id,
        request.scheduled_at,
        request.bay,
      )
      .await?;
      tx.link_appointment(order_id, appointment.id).await?;

      {
        ctx_data.write().appointment_id = Some(appointment.id);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("emit_notification", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (tx, email, total_price) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.account_email.clone(), guard.total_price)
      };
      let email = email.unwrap_or_default();

      let notification = notifications::emit(
        tx.as_ref(),
        NewNotification {
          message: order_placed_message(&email, total_price),
          category: "Order".to_string(),
          icon: "fas fa-shopping-cart".to_string(),
          status: "Active".to_string(),
        },
      )
      .await?;

      {
        ctx_data.write().notification_id = Some(notification.id);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.after("emit_notification", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let ids = {
        let guard = ctx_data.read();
        (guard.order_id, guard.appointment_id)
      };
      match ids {
        (Some(order_id), Some(appointment_id)) => {
          info!(%order_id, %appointment_id, "Checkout workflow finished.");
          Ok::<_, AppError>(StepControl::Continue)
        }
        _ => {
          error!("Checkout finished without an order or appointment id.");
          Err(AppError::Internal("Checkout did not produce an order.".to_string()))
        }
      }
    })
  });

  registry.register(w);
  info!("Checkout workflow registered.");
}

/// `New order placed by {email} with total price of RM {x.yy}`
pub fn order_placed_message(email: &str, total_price: i64) -> String {
  format!("New order placed by {} with total price of {}", email, format_rm(total_price))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn notification_message_matches_feed_format() {
    assert_eq!(
      order_placed_message("ali@example.my", 25_000),
      "New order placed by ali@example.my with total price of RM 250.00"
    );
  }
}
