// src/services/appointments.rs

use chrono::{NaiveDateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{Appointment, AppointmentStatus};
use crate::store::ShopTx;

/// Books a bay for a car. The appointment starts in `Future`.
///
/// Overlapping bookings are accepted unless `reject_double_booking` is set.
#[instrument(name = "appointments::schedule", skip(tx, config))]
pub async fn schedule(
  tx: &dyn ShopTx,
  config: &AppConfig,
  account_id: Uuid,
  car_id: i64,
  scheduled_at: NaiveDateTime,
  bay: i32,
) -> Result<Appointment> {
  if config.reject_double_booking && tx.bay_taken(bay, scheduled_at).await? {
    warn!(bay, %scheduled_at, "Bay already booked for this slot.");
    return Err(AppError::Conflict(format!(
      "Bay {} is already booked at {}",
      bay,
      scheduled_at.format("%Y-%m-%d %H:%M")
    )));
  }

  let appointment = Appointment {
    id: Uuid::new_v4(),
    account_id,
    car_id,
    scheduled_at,
    bay,
    status: AppointmentStatus::Future,
    created_at: Utc::now(),
  };
  tx.insert_appointment(&appointment).await?;

  // Read back for the generated row.
  let stored = tx
    .appointment(appointment.id)
    .await?
    .ok_or_else(|| AppError::Internal("Appointment missing after insert.".to_string()))?;
  info!(appointment_id = %stored.id, "Appointment scheduled.");
  Ok(stored)
}
