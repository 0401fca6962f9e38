// src/models/report.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::money::Sen;

/// One calendar month as a half-open UTC range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
  pub year: i32,
  pub month: u32,
  /// English month name, e.g. "January".
  pub label: String,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SalesBucket {
  pub year: i32,
  pub month: u32,
  pub label: String,
  pub total_sales: Sen,
  pub order_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
  pub year: i32,
  pub month: u32,
  pub label: String,
  pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  pub month_now: u32,
  pub previous_month: u32,
  pub total_revenue: Sen,
  pub previous_total_revenue: Sen,
  pub num_orders: i64,
  pub this_month_users: i64,
  pub previous_month_users: i64,
}
