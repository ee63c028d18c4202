// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operational status of this node
//!
//! The local status lives in a [`StatusCell`], which is shared by the
//! status state machine and the task runner. Subscribers are notified on
//! every change through a watch channel.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Operational status of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    /// Accepting and running tasks
    #[default]
    Active,
    /// Not accepting new tasks; running tasks continue
    Pause,
    /// Drained and not accepting tasks
    MaintenanceMode,
}

impl NodeStatus {
    /// Attribute value published for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Active => "ACTIVE",
            NodeStatus::Pause => "PAUSE",
            NodeStatus::MaintenanceMode => "MAINTENANCE_MODE",
        }
    }

    /// Whether the task runner may accept new tasks in this status
    pub fn accepts_tasks(&self) -> bool {
        matches!(self, NodeStatus::Active)
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status attribute value that names no known status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for NodeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(NodeStatus::Active),
            "PAUSE" => Ok(NodeStatus::Pause),
            "MAINTENANCE_MODE" => Ok(NodeStatus::MaintenanceMode),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Thread-safe holder of the local node status
#[derive(Clone)]
pub struct StatusCell {
    tx: Arc<watch::Sender<NodeStatus>>,
}

impl StatusCell {
    pub fn new(initial: NodeStatus) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> NodeStatus {
        *self.tx.borrow()
    }

    /// Replace the status, returning the previous one
    pub fn set(&self, status: NodeStatus) -> NodeStatus {
        self.tx.send_replace(status)
    }

    /// Receive a notification whenever the status changes
    pub fn subscribe(&self) -> watch::Receiver<NodeStatus> {
        self.tx.subscribe()
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(NodeStatus::Active)
    }
}

impl std::fmt::Debug for StatusCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StatusCell").field(&self.get()).finish()
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
