// src/workflow/definition.rs

//! The `Workflow<TData, Err>` struct and its step list.

use crate::core::context::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::FlowError;
use std::collections::HashMap;

/// An ordered list of named steps with handlers attached per phase.
///
/// `Err` is the error type every handler resolves to. It must absorb
/// `FlowError` so that engine-level failures (a required step without handlers,
/// a failed commit) surface through the same channel as handler errors.
pub struct Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a workflow named after its context type.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    Self::named(short_type_name::<TData>(), step_defs)
  }

  /// Creates a workflow with an explicit name, used in log spans.
  pub fn named<S: Into<String>>(name: S, step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let mut steps: Vec<StepDef<TData>> = Vec::with_capacity(step_defs.len());
    for (step_name, optional, skip_cond_opt) in step_defs {
      if steps.iter().any(|s| s.name == *step_name) {
        panic!("Workflow setup error: step '{}' declared twice.", step_name);
      }
      steps.push(StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      });
    }

    Self {
      name: name.into(),
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Panics on an unknown step name. A typo here is a setup bug, not a runtime error.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!(
        "Workflow setup error: step '{}' not found in workflow '{}'.",
        step_name, self.name
      );
    }
  }
}

fn short_type_name<T>() -> String {
  let full = std::any::type_name::<T>();
  full.rsplit("::").next().unwrap_or(full).to_string()
}
