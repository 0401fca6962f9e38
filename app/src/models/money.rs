// src/models/money.rs

//! Amounts are integer sen (1 RM = 100 sen).

pub type Sen = i64;

/// Formats an amount as `RM 1234.50`. Negative amounts keep their sign.
pub fn format_rm(amount: Sen) -> String {
  let sign = if amount < 0 { "-" } else { "" };
  let abs = amount.unsigned_abs();
  format!("RM {}{}.{:02}", sign, abs / 100, abs % 100)
}

/// `unit_price * quantity`, or `None` on overflow.
pub fn line_total(unit_price: Sen, quantity: i64) -> Option<Sen> {
  unit_price.checked_mul(quantity)
}
