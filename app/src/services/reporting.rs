// src/services/reporting.rs

//! Monthly aggregates for the admin dashboard. Months are calendar months in UTC;
//! callers pass `today` so the window is deterministic under test.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use tracing::instrument;

use crate::errors::{AppError, Result};
use crate::models::{AuthClaims, Dashboard, MonthCount, MonthWindow, SalesBucket};
use crate::state::AppState;

/// Current month plus the six before it.
pub const REPORT_MONTHS: u32 = 7;

const MONTH_NAMES: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December",
];

/// `(year, month)` shifted back by `back` months.
fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
  let index = year * 12 + month as i32 - 1 - back as i32;
  (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn month_start(year: i32, month: u32) -> Result<DateTime<Utc>> {
  let naive = NaiveDate::from_ymd_opt(year, month, 1)
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .ok_or_else(|| AppError::Internal(format!("Invalid month {}-{}", year, month)))?;
  Ok(Utc.from_utc_datetime(&naive))
}

pub fn month_window(year: i32, month: u32) -> Result<MonthWindow> {
  let start = month_start(year, month)?;
  let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
  let label = month
    .checked_sub(1)
    .and_then(|i| MONTH_NAMES.get(i as usize))
    .ok_or_else(|| AppError::Internal(format!("Invalid month {}", month)))?;
  Ok(MonthWindow {
    year,
    month,
    label: label.to_string(),
    start,
    end: month_start(next_year, next_month)?,
  })
}

/// The `months` calendar months ending with the one containing `today`, oldest first.
pub fn trailing_month_window(today: NaiveDate, months: u32) -> Result<Vec<MonthWindow>> {
  (0..months)
    .rev()
    .map(|back| {
      let (year, month) = months_before(today.year(), today.month(), back);
      month_window(year, month)
    })
    .collect()
}

#[instrument(name = "reports::sales_and_orders", skip(state, claims))]
pub async fn sales_and_orders(state: &AppState, claims: &AuthClaims, today: NaiveDate) -> Result<Vec<SalesBucket>> {
  claims.require_admin()?;
  let windows = trailing_month_window(today, REPORT_MONTHS)?;
  let tx = state.store.begin().await?;
  let mut buckets = Vec::with_capacity(windows.len());
  for w in windows {
    let (total_sales, order_count) = tx.order_totals_between(w.start, w.end).await?;
    buckets.push(SalesBucket {
      year: w.year,
      month: w.month,
      label: w.label,
      total_sales,
      order_count,
    });
  }
  tx.commit().await?;
  Ok(buckets)
}

#[instrument(name = "reports::registered_users", skip(state, claims))]
pub async fn registered_users(state: &AppState, claims: &AuthClaims, today: NaiveDate) -> Result<Vec<MonthCount>> {
  claims.require_admin()?;
  let windows = trailing_month_window(today, REPORT_MONTHS)?;
  let tx = state.store.begin().await?;
  let mut counts = Vec::with_capacity(windows.len());
  for w in windows {
    let count = tx.accounts_created_between(w.start, w.end).await?;
    counts.push(MonthCount {
      year: w.year,
      month: w.month,
      label: w.label,
      count,
    });
  }
  tx.commit().await?;
  Ok(counts)
}

#[instrument(name = "reports::order_statistics", skip(state, claims))]
pub async fn order_statistics(state: &AppState, claims: &AuthClaims, today: NaiveDate) -> Result<Vec<MonthCount>> {
  Ok(
    sales_and_orders(state, claims, today)
      .await?
      .into_iter()
      .map(|b| MonthCount {
        year: b.year,
        month: b.month,
        label: b.label,
        count: b.order_count,
      })
      .collect(),
  )
}

#[instrument(name = "reports::dashboard", skip(state, claims))]
pub async fn dashboard(state: &AppState, claims: &AuthClaims, today: NaiveDate) -> Result<Dashboard> {
  claims.require_admin()?;
  let now = month_window(today.year(), today.month())?;
  let (prev_year, prev_month) = months_before(now.year, now.month, 1);
  let previous = month_window(prev_year, prev_month)?;

  let tx = state.store.begin().await?;
  let (total_revenue, num_orders) = tx.order_totals_between(now.start, now.end).await?;
  let (previous_total_revenue, _) = tx.order_totals_between(previous.start, previous.end).await?;
  let this_month_users = tx.accounts_created_between(now.start, now.end).await?;
  let previous_month_users = tx.accounts_created_between(previous.start, previous.end).await?;
  tx.commit().await?;

  Ok(Dashboard {
    month_now: now.month,
    previous_month: previous.month,
    total_revenue,
    previous_total_revenue,
    num_orders,
    this_month_users,
    previous_month_users,
  })
}
