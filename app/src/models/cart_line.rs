// src/models/cart_line.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::money::Sen;

/// One product in an account's cart. Keyed by (account_id, product_id).
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub account_id: Uuid,
  pub product_id: String,
  pub quantity: i64,
  pub unit_price: Sen,
  pub description: String,
  pub created_at: DateTime<Utc>,
}

impl CartLine {
  pub fn line_total(&self) -> Option<Sen> {
    super::money::line_total(self.unit_price, self.quantity)
  }
}

/// Sum of every line total, `None` if any line or the running sum overflows.
pub fn cart_total(lines: &[CartLine]) -> Option<Sen> {
  lines
    .iter()
    .try_fold(0i64, |acc, line| line.line_total().and_then(|t| acc.checked_add(t)))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn line(product_id: &str, unit_price: Sen, quantity: i64) -> CartLine {
    CartLine {
      account_id: Uuid::nil(),
      product_id: product_id.to_string(),
      quantity,
      unit_price,
      description: String::new(),
      created_at: Utc::now(),
    }
  }

  #[test]
  fn cart_total_adds_every_line() {
    let lines = vec![line("TYR-1", 25_000, 4), line("SVC-1", 5_000, 1)];
    assert_eq!(cart_total(&lines), Some(105_000));
    assert_eq!(cart_total(&[]), Some(0));
  }

  #[test]
  fn cart_total_overflow_is_none_not_partial() {
    let huge_line = vec![line("TYR-1", 100, 1), line("SVC-1", 5_000, i64::MAX)];
    assert_eq!(cart_total(&huge_line), None);

    let huge_sum = vec![line("SVC-1", i64::MAX, 1), line("SVC-2", 1, 1)];
    assert_eq!(cart_total(&huge_sum), None);
  }
}
