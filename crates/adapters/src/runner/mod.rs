// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task runner: executes tasks on this node

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTaskRunner, RunnerCall};

use async_trait::async_trait;
use drover_core::TaskId;
use thiserror::Error;

/// Errors from starting a task
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("task {task} failed to start: {reason}")]
    StartFailed { task: TaskId, reason: String },
}

/// Local task execution
#[async_trait]
pub trait TaskRunner: Clone + Send + Sync + 'static {
    /// Number of tasks currently running on this node
    async fn running_task_count(&self) -> usize;

    /// Resume or start a task on this node
    async fn trigger_task(&self, task: &TaskId) -> Result<(), ExecutionError>;
}
