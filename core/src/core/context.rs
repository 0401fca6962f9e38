// src/core/context.rs

//! The boxed handler type stored for every workflow step phase.

use crate::core::context_data::ContextData;
use crate::core::control::StepControl;
use std::future::Future;
use std::pin::Pin;

/// A step handler.
///
/// Receives a clone of the workflow's `ContextData<TData>` and resolves to
/// `Result<StepControl, Err>`.
///
/// Lock guards taken on the context must be dropped before any `.await`.
/// A handler that needs the unit of work across an await point should clone its
/// handle out of the context first, release the guard, then await.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>>
    + Send
    + Sync,
>;
