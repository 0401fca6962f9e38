// src/workflows/mod.rs

//! Workflows run by the services. Each context type maps to exactly one workflow
//! in the registry.

use crate::errors::AppError;
use tayar_flow::WorkflowRegistry;

pub mod cart_workflows;
pub mod checkout_workflow;
pub mod contexts;

/// Registers every workflow the application runs. Called once at startup.
pub fn register_all_workflows(registry: &WorkflowRegistry<AppError>) {
  tracing::info!("Registering workflows...");

  cart_workflows::register_add_item_workflow(registry);
  cart_workflows::register_update_quantity_workflow(registry);
  checkout_workflow::register_checkout_workflow(registry);

  tracing::info!(count = registry.len(), "All application workflows registered.");
}
