// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task re-trigger coordinator
//!
//! Resumes tasks on this node and records them in the node task index.
//! Decisions made while handling a leave event happen inside a
//! [`LeaveBatch`], which holds the coordinator's leave-batch lock.

use crate::error::TriggerError;
use drover_adapters::{IndexError, NodeTaskIndex, TaskRunner};
use drover_core::{NodeId, TaskId};
use std::collections::BTreeSet;
use tokio::sync::{Mutex, MutexGuard};

pub struct TaskRetriggerCoordinator<R, I> {
    runner: R,
    index: I,
    node: NodeId,
    /// Guards decide-and-trigger for one leave-event batch on this node
    leave_batch: Mutex<()>,
}

impl<R: TaskRunner, I: NodeTaskIndex> TaskRetriggerCoordinator<R, I> {
    pub fn new(runner: R, index: I, node: NodeId) -> Self {
        Self {
            runner,
            index,
            node,
            leave_batch: Mutex::new(()),
        }
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Wait for exclusive use of the leave-batch scope
    pub async fn begin_leave_batch(&self) -> LeaveBatch<'_, R, I> {
        LeaveBatch {
            coordinator: self,
            _guard: self.leave_batch.lock().await,
        }
    }

    /// Whether a leave batch currently holds the scope
    pub fn in_leave_batch(&self) -> bool {
        self.leave_batch.try_lock().is_err()
    }

    /// Resume `task` here and register it under this node
    pub async fn trigger(&self, task: &TaskId) -> Result<(), TriggerError> {
        self.runner
            .trigger_task(task)
            .await
            .map_err(|source| TriggerError::Execution {
                task: task.clone(),
                source,
            })?;
        self.index
            .add_task(&self.node, task)
            .await
            .map_err(|source| TriggerError::Index {
                task: task.clone(),
                source,
            })
    }
}

/// Exclusive decide-and-trigger scope for one leave event
pub struct LeaveBatch<'a, R, I> {
    coordinator: &'a TaskRetriggerCoordinator<R, I>,
    _guard: MutexGuard<'a, ()>,
}

impl<R: TaskRunner, I: NodeTaskIndex> LeaveBatch<'_, R, I> {
    /// Tasks this node is recorded as running, read inside the scope
    pub async fn local_tasks(&self) -> Result<BTreeSet<TaskId>, IndexError> {
        self.coordinator
            .index
            .tasks_of(&self.coordinator.node)
            .await
    }

    pub async fn trigger(&self, task: &TaskId) -> Result<(), TriggerError> {
        self.coordinator.trigger(task).await
    }
}

#[cfg(test)]
#[path = "retrigger_tests.rs"]
mod tests;
