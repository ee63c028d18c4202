// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node task index: which tasks each node believes it is executing

mod memory;

pub use memory::InMemoryTaskIndex;

use async_trait::async_trait;
use drover_core::{NodeId, TaskId};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors from the node task index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("task index {map} unavailable: {reason}")]
    Unavailable { map: String, reason: String },
}

/// Distributed mapping from node id to the ids of tasks it runs
#[async_trait]
pub trait NodeTaskIndex: Clone + Send + Sync + 'static {
    /// Well-known name of the backing map
    fn name(&self) -> &str;

    /// Tasks recorded for a node; empty when the node has no entry
    async fn tasks_of(&self, node: &NodeId) -> Result<BTreeSet<TaskId>, IndexError>;

    /// Record that a node runs a task
    async fn add_task(&self, node: &NodeId, task: &TaskId) -> Result<(), IndexError>;
}
