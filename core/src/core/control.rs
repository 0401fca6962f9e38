// src/core/control.rs

//! Flow signals returned by handlers and the outcome of a whole run.

/// Returned by a handler to say whether the workflow goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Run the remaining handlers of this step, then the next steps.
  Continue,
  /// Halt the workflow now. No further handlers run.
  Stop,
}

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
  /// Every non-skipped step ran.
  Completed,
  /// A handler returned `StepControl::Stop`.
  Stopped,
}

impl WorkflowOutcome {
  pub fn is_completed(self) -> bool {
    matches!(self, WorkflowOutcome::Completed)
  }
}
