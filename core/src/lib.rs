// src/lib.rs

//! tayar-flow: an async, step-based workflow engine.
//!
//! A [`Workflow`] is an ordered list of named steps. Each step can carry
//! `before`, `on` and `after` handlers that operate on a shared
//! [`ContextData<T>`]. Handlers return a [`StepControl`] to continue or halt.
//!
//! Workflows are registered in a [`WorkflowRegistry`] keyed by their context
//! type, and can be executed inside a [`UnitOfWork`]: the unit of work is
//! committed once when the run finishes without error and rolled back once when
//! any handler fails.

pub mod core;
pub mod error;
pub mod registry;
pub mod unit_of_work;
pub mod workflow;

pub use crate::core::context::Handler;
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{StepControl, WorkflowOutcome};
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::workflow::definition::Workflow;

pub use crate::error::{FlowError, FlowResult};
pub use crate::registry::WorkflowRegistry;
pub use crate::unit_of_work::UnitOfWork;

/*
    Typical use:
    1. Define a context struct `MyCtx` holding request inputs, a handle to the
       unit of work, and slots for values produced by steps.
    2. Build a `Workflow<MyCtx, MyError>` with its step list and register
       handlers with `.on()`, `.before()`, `.after()`.
    3. Register it: `registry.register(workflow)`.
    4. Per request: open the unit of work, wrap `MyCtx` in `ContextData`, call
       `registry.run_atomic(ctx.clone(), &*uow).await?`, then read results
       back out of `ctx`.
*/
