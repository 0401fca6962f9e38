// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

impl FromStr for StoreBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
      "memory" | "in-memory" => Ok(StoreBackend::Memory),
      other => Err(AppError::Config(format!("Unknown STORE_BACKEND '{}'", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  pub database_url: Option<String>,
  pub database_max_connections: u32,

  /// Workshop bays are numbered `1..=bay_count`.
  pub bay_count: i32,
  pub reject_double_booking: bool,
  pub notification_feed_limit: i64,

  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      store_backend: StoreBackend::Postgres,
      database_url: None,
      database_max_connections: 5,
      bay_count: 5,
      reject_double_booking: false,
      notification_feed_limit: 10,
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any key lookup. Unset keys take their defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Self::default();

    let parse_or = |var_name: &str, default: String| -> String { lookup(var_name).unwrap_or(default) };

    let server_host = parse_or("SERVER_HOST", defaults.server_host);
    let server_port = parse_var::<u16>("SERVER_PORT", &parse_or("SERVER_PORT", defaults.server_port.to_string()))?;
    let store_backend: StoreBackend = parse_or("STORE_BACKEND", "postgres".to_string()).parse()?;
    let database_url = lookup("DATABASE_URL");
    if store_backend == StoreBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required for the postgres backend)".to_string(),
      ));
    }
    let database_max_connections = parse_var::<u32>(
      "DATABASE_MAX_CONNECTIONS",
      &parse_or("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections.to_string()),
    )?;
    let bay_count = parse_var::<i32>("BAY_COUNT", &parse_or("BAY_COUNT", defaults.bay_count.to_string()))?;
    if bay_count < 1 {
      return Err(AppError::Config(format!("BAY_COUNT must be at least 1, got {}", bay_count)));
    }
    let reject_double_booking = parse_var::<bool>(
      "REJECT_DOUBLE_BOOKING",
      &parse_or("REJECT_DOUBLE_BOOKING", "false".to_string()),
    )?;
    let notification_feed_limit = parse_var::<i64>(
      "NOTIFICATION_FEED_LIMIT",
      &parse_or("NOTIFICATION_FEED_LIMIT", defaults.notification_feed_limit.to_string()),
    )?;
    let seed_db = parse_var::<bool>("SEED_DB", &parse_or("SEED_DB", "false".to_string()))?;

    tracing::info!(?store_backend, bay_count, "Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      database_max_connections,
      bay_count,
      reject_double_booking,
      notification_feed_limit,
      seed_db,
    })
  }

  /// In-memory backend with default limits.
  pub fn in_memory() -> Self {
    Self {
      store_backend: StoreBackend::Memory,
      ..Self::default()
    }
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(var_name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e)))
}
