// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tayar_flow::{ContextData, FlowError, StepControl, UnitOfWork};
use tracing::Level;

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> tayar_flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = %step_name, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(StepControl::Stop);
      }
      Ok(StepControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> tayar_flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      tracing::warn!(target: "test_handlers", step = %step_name, "failing with: '{}'", error_message);
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

/// Counts commit and rollback calls. `fail_commit` makes `commit` error.
#[derive(Debug, Default)]
pub struct RecordingUnitOfWork {
  pub commits: AtomicUsize,
  pub rollbacks: AtomicUsize,
  pub fail_commit: AtomicBool,
  pub fail_rollback: AtomicBool,
}

impl RecordingUnitOfWork {
  pub fn commits(&self) -> usize {
    self.commits.load(Ordering::SeqCst)
  }

  pub fn rollbacks(&self) -> usize {
    self.rollbacks.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl UnitOfWork for RecordingUnitOfWork {
  async fn commit(&self) -> anyhow::Result<()> {
    self.commits.fetch_add(1, Ordering::SeqCst);
    if self.fail_commit.load(Ordering::SeqCst) {
      anyhow::bail!("commit refused");
    }
    Ok(())
  }

  async fn rollback(&self) -> anyhow::Result<()> {
    self.rollbacks.fetch_add(1, Ordering::SeqCst);
    if self.fail_rollback.load(Ordering::SeqCst) {
      anyhow::bail!("rollback refused");
    }
    Ok(())
  }
}

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
