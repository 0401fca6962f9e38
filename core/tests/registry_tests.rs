// tests/registry_tests.rs
mod common;

use common::*;
use tayar_flow::{ContextData, FlowError, StepControl, Workflow, WorkflowOutcome, WorkflowRegistry};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegistryContextAlpha {
  val: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegistryContextBeta {
  num: i32,
}

#[tokio::test]
async fn test_registry_runs_workflow_for_context_type() {
  setup_tracing();
  let registry = WorkflowRegistry::<TestError>::new();

  let mut w_alpha = Workflow::<RegistryContextAlpha, TestError>::new(&[("alpha_task", false, None)]);
  w_alpha.on("alpha_task", |ctx: ContextData<RegistryContextAlpha>| {
    Box::pin(async move {
      ctx.write().val = "alpha_processed".to_string();
      Ok::<StepControl, FlowError>(StepControl::Continue)
    })
  });
  registry.register(w_alpha);

  let mut w_beta = Workflow::<RegistryContextBeta, TestError>::new(&[("beta_task", false, None)]);
  w_beta.on("beta_task", |ctx: ContextData<RegistryContextBeta>| {
    Box::pin(async move {
      ctx.write().num = 100;
      Ok::<StepControl, FlowError>(StepControl::Continue)
    })
  });
  registry.register(w_beta);

  assert_eq!(registry.len(), 2);
  assert!(registry.contains::<RegistryContextAlpha>());

  let ctx_alpha = ContextData::new(RegistryContextAlpha::default());
  assert_eq!(registry.run(ctx_alpha.clone()).await.unwrap(), WorkflowOutcome::Completed);
  assert_eq!(ctx_alpha.read().val, "alpha_processed");

  let ctx_beta = ContextData::new(RegistryContextBeta::default());
  assert_eq!(registry.run(ctx_beta.clone()).await.unwrap(), WorkflowOutcome::Completed);
  assert_eq!(ctx_beta.read().num, 100);
}

#[tokio::test]
async fn test_registry_workflow_not_registered() {
  setup_tracing();
  let registry = WorkflowRegistry::<TestError>::new();
  assert!(registry.is_empty());

  #[derive(Clone, Debug, Default)]
  struct UnregisteredContext;

  let result = registry.run(ContextData::new(UnregisteredContext)).await;
  match result {
    Err(TestError::Flow(s)) => {
      assert!(s.contains("NotRegistered"));
      assert!(s.contains("UnregisteredContext"));
    }
    other => panic!("Expected NotRegistered, got {:?}", other),
  }
}

#[tokio::test]
async fn test_registry_surfaces_handler_error() {
  setup_tracing();
  let registry = WorkflowRegistry::<TestError>::new();

  let mut w_alpha = Workflow::<RegistryContextAlpha, TestError>::new(&[("alpha_fail", false, None)]);
  w_alpha.on("alpha_fail", |_ctx: ContextData<RegistryContextAlpha>| {
    Box::pin(async move { Err(TestError::Handler("Alpha workflow failed".to_string())) })
  });
  registry.register(w_alpha);

  let res = registry.run(ContextData::new(RegistryContextAlpha::default())).await;
  assert_eq!(res.unwrap_err(), TestError::Handler("Alpha workflow failed".to_string()));
}

#[tokio::test]
async fn test_registry_run_atomic_commits_through_registry() {
  setup_tracing();
  let registry = WorkflowRegistry::<FlowError>::default();

  let mut workflow = Workflow::<RegistryContextBeta, FlowError>::new(&[("task", false, None)]);
  workflow.on("task", |ctx: ContextData<RegistryContextBeta>| {
    Box::pin(async move {
      ctx.write().num = 1;
      Ok::<_, FlowError>(StepControl::Continue)
    })
  });
  registry.register(workflow);

  let uow = RecordingUnitOfWork::default();
  let ctx = ContextData::new(RegistryContextBeta::default());
  let result = registry.run_atomic(ctx.clone(), &uow).await;

  assert_eq!(result.unwrap(), WorkflowOutcome::Completed);
  assert_eq!(ctx.read().num, 1);
  assert_eq!(uow.commits(), 1);
  assert_eq!(uow.rollbacks(), 0);
}
