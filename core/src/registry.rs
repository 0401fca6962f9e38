// src/registry.rs

//! `WorkflowRegistry<E>`: workflows keyed by the type of their context data.

use crate::core::context_data::ContextData;
use crate::core::control::WorkflowOutcome;
use crate::error::FlowError;
use crate::unit_of_work::UnitOfWork;
use crate::workflow::definition::Workflow;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Type-erased runner stored in the registry.
#[async_trait]
trait AnyWorkflowRunner<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  async fn run_erased(
    &self,
    ctx_obj: Box<dyn Any + Send>,
    uow: Option<&dyn UnitOfWork>,
  ) -> Result<WorkflowOutcome, AppErr>;
}

struct WorkflowWrapper<TData, HandlerErr, AppErr>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  workflow: Arc<Workflow<TData, HandlerErr>>,
  _phantom_app_err: PhantomData<fn() -> AppErr>,
}

#[async_trait]
impl<TData, HandlerErr, AppErr> AnyWorkflowRunner<AppErr> for WorkflowWrapper<TData, HandlerErr, AppErr>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(
    &self,
    ctx_obj: Box<dyn Any + Send>,
    uow: Option<&dyn UnitOfWork>,
  ) -> Result<WorkflowOutcome, AppErr> {
    let typed_ctx_data = match ctx_obj.downcast::<ContextData<TData>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<ContextData<TData>>().to_string();
        event!(Level::ERROR, %expected_type, "Context object type mismatch.");
        return Err(AppErr::from(FlowError::TypeMismatch { expected_type }));
      }
    };

    let result = match uow {
      Some(uow) => self.workflow.run_atomic(typed_ctx_data, uow).await,
      None => self.workflow.run(typed_ctx_data).await,
    };
    result.map_err(AppErr::from)
  }
}

/// Registry of workflows. `AppErr` is what callers of `run` receive.
pub struct WorkflowRegistry<AppErr = FlowError>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  registry: RwLock<HashMap<TypeId, Arc<dyn AnyWorkflowRunner<AppErr>>>>,
}

impl<AppErr> WorkflowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      registry: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `workflow` for its context type. A second registration for the
  /// same type replaces the first.
  pub fn register<TData, HandlerErr>(&self, workflow: Workflow<TData, HandlerErr>)
  where
    TData: 'static + Send + Sync,
    HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    AppErr: From<HandlerErr>,
  {
    event!(
      Level::DEBUG,
      workflow = %workflow.name(),
      tdata_type = %std::any::type_name::<TData>(),
      "Registering workflow."
    );
    let wrapper = WorkflowWrapper::<TData, HandlerErr, AppErr> {
      workflow: Arc::new(workflow),
      _phantom_app_err: PhantomData,
    };
    self.registry.write().insert(TypeId::of::<TData>(), Arc::new(wrapper));
  }

  pub fn contains<TData: 'static>(&self) -> bool {
    self.registry.read().contains_key(&TypeId::of::<TData>())
  }

  pub fn len(&self) -> usize {
    self.registry.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Runs the workflow registered for `TData` without a unit of work.
  #[instrument(name = "WorkflowRegistry::run", skip_all, fields(tdata_type = %std::any::type_name::<TData>()))]
  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> Result<WorkflowOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.lookup::<TData>()?;
    runner.run_erased(Box::new(ctx_data), None).await
  }

  /// Runs the workflow registered for `TData` inside `uow`, committing or rolling back.
  #[instrument(name = "WorkflowRegistry::run_atomic", skip_all, fields(tdata_type = %std::any::type_name::<TData>()))]
  pub async fn run_atomic<TData>(
    &self,
    ctx_data: ContextData<TData>,
    uow: &dyn UnitOfWork,
  ) -> Result<WorkflowOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.lookup::<TData>()?;
    runner.run_erased(Box::new(ctx_data), Some(uow)).await
  }

  fn lookup<TData: 'static>(&self) -> Result<Arc<dyn AnyWorkflowRunner<AppErr>>, AppErr> {
    self.registry.read().get(&TypeId::of::<TData>()).cloned().ok_or_else(|| {
      let type_name = std::any::type_name::<TData>().to_string();
      event!(Level::ERROR, %type_name, "No workflow registered.");
      AppErr::from(FlowError::NotRegistered { type_name })
    })
  }
}

impl<AppErr> Default for WorkflowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
