// src/unit_of_work.rs

//! The transactional boundary a workflow can run inside.

use async_trait::async_trait;

/// Something that buffers the side effects of a workflow run and makes them
/// durable on `commit`, or discards them on `rollback`.
///
/// `Workflow::run_atomic` calls exactly one of the two, exactly once, after the
/// last handler has returned. Implementations may assume neither is called again.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
  async fn commit(&self) -> anyhow::Result<()>;

  async fn rollback(&self) -> anyhow::Result<()>;
}
