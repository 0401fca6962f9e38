// examples/atomic_workflow.rs

//! A three-step workflow run inside an in-memory unit of work.
//! The second run fails in its last step and nothing it staged is kept.

use async_trait::async_trait;
use parking_lot::Mutex;
use tayar_flow::{ContextData, FlowError, StepControl, UnitOfWork, Workflow, WorkflowOutcome};
use tracing::info;

/// Stages writes and publishes them to `committed` on commit.
#[derive(Default)]
struct Ledger {
  staged: Mutex<Vec<String>>,
  committed: Mutex<Vec<String>>,
}

#[async_trait]
impl UnitOfWork for Ledger {
  async fn commit(&self) -> anyhow::Result<()> {
    let staged: Vec<String> = self.staged.lock().drain(..).collect();
    self.committed.lock().extend(staged);
    Ok(())
  }

  async fn rollback(&self) -> anyhow::Result<()> {
    self.staged.lock().clear();
    Ok(())
  }
}

#[derive(Default)]
struct StockMove {
  sku: String,
  quantity: i64,
  fail_at_notify: bool,
  ledger: Option<std::sync::Arc<Ledger>>,
}

fn build_workflow() -> Workflow<StockMove, FlowError> {
  let mut workflow = Workflow::<StockMove, FlowError>::named(
    "stock_move",
    &[("validate", false, None), ("reserve", false, None), ("notify", true, None)],
  );

  workflow.on("validate", |ctx: ContextData<StockMove>| {
    Box::pin(async move {
      if ctx.read().quantity <= 0 {
        return Err(FlowError::Internal("quantity must be positive".into()));
      }
      Ok(StepControl::Continue)
    })
  });

  workflow.on("reserve", |ctx: ContextData<StockMove>| {
    Box::pin(async move {
      let guard = ctx.read();
      if let Some(ledger) = &guard.ledger {
        ledger.staged.lock().push(format!("reserve {} x{}", guard.sku, guard.quantity));
      }
      Ok::<_, FlowError>(StepControl::Continue)
    })
  });

  workflow.on("notify", |ctx: ContextData<StockMove>| {
    Box::pin(async move {
      if ctx.read().fail_at_notify {
        return Err(FlowError::Internal("notifier unavailable".into()));
      }
      info!(sku = %ctx.read().sku, "Stock moved.");
      Ok(StepControl::Continue)
    })
  });

  workflow
}

#[tokio::main]
async fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let workflow = build_workflow();
  let ledger = std::sync::Arc::new(Ledger::default());

  let ok_ctx = ContextData::new(StockMove {
    sku: "T001".into(),
    quantity: 4,
    ledger: Some(ledger.clone()),
    ..Default::default()
  });
  let outcome = workflow.run_atomic(ok_ctx, ledger.as_ref()).await?;
  assert_eq!(outcome, WorkflowOutcome::Completed);

  let failing_ctx = ContextData::new(StockMove {
    sku: "T002".into(),
    quantity: 2,
    fail_at_notify: true,
    ledger: Some(ledger.clone()),
  });
  let err = workflow.run_atomic(failing_ctx, ledger.as_ref()).await.unwrap_err();
  info!(error = %err, "Second move rolled back.");

  let committed = ledger.committed.lock().clone();
  info!(?committed, "Committed entries.");
  assert_eq!(committed, vec!["reserve T001 x4".to_string()]);
  Ok(())
}
