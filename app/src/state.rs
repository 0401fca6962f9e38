// src/state.rs

use std::sync::Arc;
use tayar_flow::WorkflowRegistry;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::store::ShopStore;
use crate::workflows;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ShopStore>,
  pub flows: Arc<WorkflowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Builds the state and registers every workflow.
  pub fn new(store: Arc<dyn ShopStore>, config: Arc<AppConfig>) -> Self {
    let flows = Arc::new(WorkflowRegistry::<AppError>::new());
    workflows::register_all_workflows(&flows);
    Self { store, flows, config }
  }
}
