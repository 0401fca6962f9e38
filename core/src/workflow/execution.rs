// src/workflow/execution.rs

//! `Workflow::run()` and `Workflow::run_atomic()`.

use crate::core::context::Handler;
use crate::core::context_data::ContextData;
use crate::core::control::{StepControl, WorkflowOutcome};
use crate::error::FlowError;
use crate::unit_of_work::UnitOfWork;
use crate::workflow::definition::Workflow;
use tracing::{event, info_span, instrument, Instrument, Level};

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes every step in order against `ctx_data`.
  ///
  /// Per step: the `skip_if` condition is evaluated first; then `before`, `on`
  /// and `after` handlers run in registration order. The first `Stop` ends the
  /// run with `WorkflowOutcome::Stopped`, the first error ends it with that error.
  #[instrument(
    name = "Workflow::run",
    skip_all,
    fields(workflow = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<WorkflowOutcome, Err> {
    event!(Level::DEBUG, "Workflow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(ctx_data.clone()) {
          event!(Level::INFO, step_name, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let before = self.before.get(step_name).map(Vec::as_slice).unwrap_or_default();
      let on = self.on.get(step_name).map(Vec::as_slice).unwrap_or_default();
      let after = self.after.get(step_name).map(Vec::as_slice).unwrap_or_default();

      if before.is_empty() && on.is_empty() && after.is_empty() {
        if step_def.optional {
          event!(Level::DEBUG, step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step_name, "Required step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let step_span = info_span!("workflow_step", step_name, step_index = step_idx);
      let control = async {
        for (phase, handlers) in [("before", before), ("on", on), ("after", after)] {
          if run_phase(phase, handlers, &ctx_data).await? == StepControl::Stop {
            return Ok::<_, Err>(StepControl::Stop);
          }
        }
        Ok(StepControl::Continue)
      }
      .instrument(step_span)
      .await?;

      if control == StepControl::Stop {
        event!(Level::INFO, step_name, "Workflow stopped.");
        return Ok(WorkflowOutcome::Stopped);
      }
    }

    event!(Level::DEBUG, "Workflow execution completed.");
    Ok(WorkflowOutcome::Completed)
  }

  /// Executes the workflow inside `uow`.
  ///
  /// Commits once if the run completes or is stopped. Rolls back once if any
  /// handler fails, then returns the handler's error. A failed rollback is logged
  /// and the original error still wins. A failed commit is returned as
  /// `FlowError::CommitFailed`.
  pub async fn run_atomic<U>(&self, ctx_data: ContextData<TData>, uow: &U) -> Result<WorkflowOutcome, Err>
  where
    U: UnitOfWork + ?Sized,
  {
    match self.run(ctx_data).await {
      Ok(outcome) => {
        uow.commit().await.map_err(|source| {
          event!(Level::ERROR, workflow = %self.name, error = %source, "Commit failed.");
          Err::from(FlowError::CommitFailed { source })
        })?;
        event!(Level::DEBUG, workflow = %self.name, ?outcome, "Unit of work committed.");
        Ok(outcome)
      }
      Err(handler_err) => {
        if let Err(rollback_err) = uow.rollback().await {
          event!(
            Level::ERROR,
            workflow = %self.name,
            error = %rollback_err,
            "Rollback failed after handler error."
          );
        } else {
          event!(Level::INFO, workflow = %self.name, error = %handler_err, "Unit of work rolled back.");
        }
        Err(handler_err)
      }
    }
  }
}

async fn run_phase<TData, Err>(
  phase: &'static str,
  handlers: &[Handler<TData, Err>],
  ctx_data: &ContextData<TData>,
) -> Result<StepControl, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    match handler_fn(ctx_data.clone()).await {
      Ok(StepControl::Continue) => {}
      Ok(StepControl::Stop) => {
        event!(Level::INFO, phase, handler_index = handler_idx, "Handler requested stop.");
        return Ok(StepControl::Stop);
      }
      Err(e) => {
        event!(Level::ERROR, phase, handler_index = handler_idx, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(StepControl::Continue)
}
