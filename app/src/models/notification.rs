// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub id: Uuid,
  pub message: String,
  pub category: String,
  pub icon: String,
  pub status: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
  pub message: String,
  pub category: String,
  pub icon: String,
  pub status: String,
}

impl NewNotification {
  pub fn into_notification(self) -> Notification {
    Notification {
      id: Uuid::new_v4(),
      message: self.message,
      category: self.category,
      icon: self.icon,
      status: self.status,
      created_at: Utc::now(),
    }
  }
}
