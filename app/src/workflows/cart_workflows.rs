// src/workflows/cart_workflows.rs

use chrono::Utc;
use std::sync::Arc;
use tayar_flow::{ContextData, SkipCondition, StepControl, Workflow, WorkflowRegistry};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::{CartLine, Product};
use crate::store::ShopTx;
use crate::workflows::contexts::{AddItemCtxData, UpdateQuantityCtxData};

pub fn register_add_item_workflow(registry: &WorkflowRegistry<AppError>) {
  // Services carry no stock.
  let skip_services: SkipCondition<AddItemCtxData> = Arc::new(|ctx_data: ContextData<AddItemCtxData>| {
    ctx_data.read().product.as_ref().is_some_and(|p| !p.is_stocked())
  });

  let mut w = Workflow::<AddItemCtxData, AppError>::named(
    "cart_add_item",
    &[
      ("validate_input", false, None),
      ("load_product", false, None),
      ("reserve_stock", false, Some(skip_services)),
      ("write_cart_line", false, None),
    ],
  );

  w.on("validate_input", |ctx_data: ContextData<AddItemCtxData>| {
    Box::pin(async move {
      let quantity = { ctx_data.read().quantity };
      if quantity <= 0 {
        warn!(quantity, "Add item: rejected non-positive quantity.");
        return Err(AppError::Validation("Quantity must be greater than zero".to_string()));
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("load_product", |ctx_data: ContextData<AddItemCtxData>| {
    Box::pin(async move {
      let (tx, account_id, product_id) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.account_id, guard.product_id.clone())
      };

      let product = tx
        .product(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
      let existing_line = tx.cart_line(account_id, &product_id).await?;

      {
        let mut guard = ctx_data.write();
        guard.product = Some(product);
        guard.existing_line = existing_line;
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("reserve_stock", |ctx_data: ContextData<AddItemCtxData>| {
    Box::pin(async move {
      let (tx, product_id, quantity, stock) = {
        let guard = ctx_data.read();
        let stock = guard.product.as_ref().and_then(Product::stock).unwrap_or(0);
        (guard.tx.clone(), guard.product_id.clone(), guard.quantity, stock)
      };
      reserve(tx.as_ref(), &product_id, quantity, stock).await?;
      info!(%product_id, quantity, "Add item: stock reserved.");
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("write_cart_line", |ctx_data: ContextData<AddItemCtxData>| {
    Box::pin(async move {
      let (tx, line) = {
        let guard = ctx_data.read();
        let line = match (&guard.existing_line, &guard.product) {
          (Some(existing), _) => {
            // Services have no stock cap, so repeated adds can grow without bound.
            let quantity = existing.quantity.checked_add(guard.quantity).ok_or_else(|| {
              warn!(existing = existing.quantity, added = guard.quantity, "Add item: quantity overflow.");
              AppError::Validation("Quantity is too large".to_string())
            })?;
            CartLine {
              quantity,
              ..existing.clone()
            }
          }
          (None, Some(product)) => CartLine {
            account_id: guard.account_id,
            product_id: product.id().to_string(),
            quantity: guard.quantity,
            unit_price: product.unit_price(),
            description: product.description().to_string(),
            created_at: Utc::now(),
          },
          (None, None) => return Err(AppError::Internal("Product was not loaded.".to_string())),
        };
        (guard.tx.clone(), line)
      };

      tx.upsert_cart_line(&line).await?;
      info!(product_id = %line.product_id, quantity = line.quantity, "Add item: cart line written.");
      {
        ctx_data.write().result_line = Some(line);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  registry.register(w);
  info!("Add item workflow registered.");
}

pub fn register_update_quantity_workflow(registry: &WorkflowRegistry<AppError>) {
  let skip_services: SkipCondition<UpdateQuantityCtxData> = Arc::new(|ctx_data: ContextData<UpdateQuantityCtxData>| {
    ctx_data.read().product.as_ref().is_some_and(|p| !p.is_stocked())
  });

  let mut w = Workflow::<UpdateQuantityCtxData, AppError>::named(
    "cart_update_quantity",
    &[
      ("validate_input", false, None),
      ("load_line", false, None),
      ("adjust_stock", false, Some(skip_services)),
      ("write_cart_line", false, None),
    ],
  );

  w.on("validate_input", |ctx_data: ContextData<UpdateQuantityCtxData>| {
    Box::pin(async move {
      let new_quantity = { ctx_data.read().new_quantity };
      if new_quantity < 1 {
        warn!(new_quantity, "Update quantity: rejected quantity below one.");
        return Err(AppError::Validation("Quantity must be at least 1".to_string()));
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("load_line", |ctx_data: ContextData<UpdateQuantityCtxData>| {
    Box::pin(async move {
      let (tx, account_id, product_id) = {
        let guard = ctx_data.read();
        (guard.tx.clone(), guard.account_id, guard.product_id.clone())
      };

      let line = tx
        .cart_line(account_id, &product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;
      let product = tx.product(&product_id).await?;

      {
        let mut guard = ctx_data.write();
        guard.line = Some(line);
        guard.product = product;
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("adjust_stock", |ctx_data: ContextData<UpdateQuantityCtxData>| {
    Box::pin(async move {
      let (tx, product_id, delta, stock) = {
        let guard = ctx_data.read();
        let current = guard.line.as_ref().map(|l| l.quantity).unwrap_or(0);
        let stock = guard.product.as_ref().and_then(Product::stock).unwrap_or(0);
        (guard.tx.clone(), guard.product_id.clone(), guard.new_quantity - current, stock)
      };

      if delta > 0 {
        reserve(tx.as_ref(), &product_id, delta, stock).await?;
      } else if delta < 0 {
        tx.return_stock(&product_id, -delta).await?;
      }
      info!(%product_id, delta, "Update quantity: stock adjusted.");
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  w.on("write_cart_line", |ctx_data: ContextData<UpdateQuantityCtxData>| {
    Box::pin(async move {
      let (tx, line) = {
        let guard = ctx_data.read();
        let line = guard
          .line
          .as_ref()
          .map(|l| CartLine {
            quantity: guard.new_quantity,
            ..l.clone()
          })
          .ok_or_else(|| AppError::Internal("Cart line was not loaded.".to_string()))?;
        (guard.tx.clone(), line)
      };

      tx.upsert_cart_line(&line).await?;
      {
        ctx_data.write().result_line = Some(line);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  registry.register(w);
  info!("Update quantity workflow registered.");
}

/// Takes `quantity` of a tyre off the shelf, or fails without touching stock.
#[instrument(name = "cart::reserve", skip(tx))]
async fn reserve(tx: &dyn ShopTx, product_id: &str, quantity: i64, stock: i64) -> Result<(), AppError> {
  let insufficient = || AppError::InsufficientStock {
    product_id: product_id.to_string(),
    requested: quantity,
    available: stock,
  };
  if quantity > stock {
    warn!(quantity, stock, "Requested quantity exceeds stock.");
    return Err(insufficient());
  }
  // Stock may have moved since it was read.
  if !tx.take_stock(product_id, quantity).await? {
    warn!(quantity, "Guarded stock decrement matched no row.");
    return Err(insufficient());
  }
  Ok(())
}
