// src/services/notifications.rs

use tracing::{event, Level};

use crate::errors::Result;
use crate::models::{AuthClaims, NewNotification, Notification};
use crate::state::AppState;
use crate::store::ShopTx;

/// Appends a notification inside the caller's unit of work.
pub async fn emit(tx: &dyn ShopTx, new: NewNotification) -> Result<Notification> {
  let notification = new.into_notification();
  tx.insert_notification(&notification).await?;
  event!(Level::INFO, notification_id = %notification.id, category = %notification.category, "Notification emitted.");
  Ok(notification)
}

/// Latest notifications, newest first, capped by the configured feed limit.
pub async fn recent(state: &AppState, claims: &AuthClaims) -> Result<Vec<Notification>> {
  claims.require_admin()?;
  let tx = state.store.begin().await?;
  let feed = tx.recent_notifications(state.config.notification_feed_limit).await?;
  tx.commit().await?;
  Ok(feed)
}
