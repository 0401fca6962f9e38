// tests/error_handling_tests.rs
mod common;

use common::*;
use serial_test::serial;
use tayar_flow::{ContextData, FlowError, StepControl, Workflow};

#[tokio::test]
#[serial]
async fn test_required_step_missing_handler_fails() {
  setup_tracing();
  let workflow = Workflow::<TestContext, TestError>::new(&[("missing", false, None)]);
  let result = workflow.run(ContextData::new(TestContext::default())).await;

  match result.unwrap_err() {
    TestError::Flow(s) => {
      assert!(s.contains("HandlerMissing"));
      assert!(s.contains("missing"));
    }
    other => panic!("Expected TestError::Flow(HandlerMissing), got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_workflow_with_flow_error_type() {
  setup_tracing();
  let mut workflow = Workflow::<TestContext, FlowError>::new(&[("fail_task", false, None)]);
  workflow.on("fail_task", |_ctx| {
    Box::pin(async move { Err(FlowError::Internal("Intentional FlowError".to_string())) })
  });

  match workflow.run(ContextData::new(TestContext::default())).await.unwrap_err() {
    FlowError::Internal(s) => assert_eq!(s, "Intentional FlowError"),
    other => panic!("Expected FlowError::Internal, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_anyhow_error_from_handler_becomes_handler_error() {
  setup_tracing();
  let mut workflow = Workflow::<TestContext, FlowError>::new(&[("io", false, None)]);
  workflow.on("io", |_ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let parsed: Result<StepControl, anyhow::Error> = Err(anyhow::anyhow!("disk on fire"));
      Ok::<_, FlowError>(parsed?)
    })
  });

  let err = workflow.run(ContextData::new(TestContext::default())).await.unwrap_err();
  assert!(matches!(err, FlowError::HandlerError { .. }));
  assert!(err.to_string().contains("disk on fire"));
}
