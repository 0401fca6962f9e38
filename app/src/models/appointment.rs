// src/models/appointment.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "appointment_status_enum")]
pub enum AppointmentStatus {
  Future,
  Completed,
  Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
  pub id: Uuid,
  pub account_id: Uuid,
  pub car_id: i64,
  /// Workshop local time.
  pub scheduled_at: NaiveDateTime,
  pub bay: i32,
  pub status: AppointmentStatus,
  pub created_at: DateTime<Utc>,
}
