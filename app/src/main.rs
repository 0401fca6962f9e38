// src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use tayarpro::config::{AppConfig, StoreBackend};
use tayarpro::errors::{AppError, Result as AppResult};
use tayarpro::state::AppState;
use tayarpro::store::{seed, MemoryStore, PgStore, ShopStore};
use tayarpro::web::configure_app_routes;

fn init_tracing() {
  let json = std::env::var("LOG_FORMAT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false);
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn ShopStore>> {
  match config.store_backend {
    StoreBackend::Postgres => {
      let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;
      let store = PgStore::connect(url, config.database_max_connections).await?;
      store.apply_schema().await?;
      tracing::info!("Successfully connected to the database.");
      Ok(Arc::new(store))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store; data is lost on shutdown.");
      Ok(Arc::new(MemoryStore::new()))
    }
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  init_tracing();
  tracing::info!("Starting TayarPro server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let store = match open_store(&app_config).await {
    Ok(store) => store,
    Err(e) => {
      tracing::error!(error = %e, "Failed to open the store.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  if app_config.seed_db {
    if let Err(e) = seed::seed_demo_data(store.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed the store.");
    }
  }

  let app_state = AppState::new(store, app_config.clone());

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
