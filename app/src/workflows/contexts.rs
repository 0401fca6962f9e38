// src/workflows/contexts.rs

//! Data carried through each workflow run. Handlers receive these wrapped in
//! `tayar_flow::ContextData`.

use chrono::NaiveDateTime;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{CartLine, PaymentMethod, Product};
use crate::store::ShopTx;

// --- Cart ---

pub struct AddItemCtxData {
  pub tx: Arc<dyn ShopTx>,
  pub account_id: Uuid,
  pub product_id: String,
  pub quantity: i64,

  pub product: Option<Product>,
  pub existing_line: Option<CartLine>,
  pub result_line: Option<CartLine>,
}

impl AddItemCtxData {
  pub fn new(tx: Arc<dyn ShopTx>, account_id: Uuid, product_id: String, quantity: i64) -> Self {
    Self {
      tx,
      account_id,
      product_id,
      quantity,
      product: None,
      existing_line: None,
      result_line: None,
    }
  }
}

pub struct UpdateQuantityCtxData {
  pub tx: Arc<dyn ShopTx>,
  pub account_id: Uuid,
  pub product_id: String,
  pub new_quantity: i64,

  pub line: Option<CartLine>,
  pub product: Option<Product>,
  pub result_line: Option<CartLine>,
}

impl UpdateQuantityCtxData {
  pub fn new(tx: Arc<dyn ShopTx>, account_id: Uuid, product_id: String, new_quantity: i64) -> Self {
    Self {
      tx,
      account_id,
      product_id,
      new_quantity,
      line: None,
      product: None,
      result_line: None,
    }
  }
}

// --- Checkout ---

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
  pub car_id: i64,
  pub bay: i32,
  pub scheduled_at: NaiveDateTime,
  pub payment_method: PaymentMethod,
}

pub struct CheckoutCtxData {
  pub tx: Arc<dyn ShopTx>,
  pub config: Arc<AppConfig>,
  pub account_id: Uuid,
  pub request: CheckoutRequest,

  pub account_email: Option<String>,
  pub lines: Vec<CartLine>,
  pub total_price: i64,
  pub order_id: Option<Uuid>,
  pub appointment_id: Option<Uuid>,
  pub notification_id: Option<Uuid>,
}

impl CheckoutCtxData {
  pub fn new(tx: Arc<dyn ShopTx>, config: Arc<AppConfig>, account_id: Uuid, request: CheckoutRequest) -> Self {
    Self {
      tx,
      config,
      account_id,
      request,
      account_email: None,
      lines: Vec::new(),
      total_price: 0,
      order_id: None,
      appointment_id: None,
      notification_id: None,
    }
  }
}
