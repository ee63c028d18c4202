// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events produced by membership reconciliation and status transitions

use crate::id::{Host, NodeId, TaskId};
use crate::status::NodeStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An observable outcome of handling a membership or attribute event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClusterEvent {
    /// Hosts newly recorded in the cluster configuration
    ConfigMembersAdded { hosts: Vec<Host> },
    /// A host dropped from the cluster configuration
    ConfigMemberRemoved { host: Host },
    /// A task of a departed node was resumed here
    TaskRetriggered { task: TaskId, node: NodeId },
    /// Resuming a task of a departed node failed
    TaskRetriggerFailed { task: TaskId, reason: String },
    /// Local node status changed
    StatusChanged { from: NodeStatus, to: NodeStatus },
    /// Drain wait before maintenance mode ended
    DrainFinished {
        polls: u32,
        running: usize,
        #[serde(with = "humantime_serde")]
        waited: Duration,
        timed_out: bool,
    },
}

impl ClusterEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClusterEvent::ConfigMembersAdded { .. } => "config:members:added",
            ClusterEvent::ConfigMemberRemoved { .. } => "config:member:removed",
            ClusterEvent::TaskRetriggered { .. } => "task:retriggered",
            ClusterEvent::TaskRetriggerFailed { .. } => "task:retrigger:failed",
            ClusterEvent::StatusChanged { .. } => "node:status:changed",
            ClusterEvent::DrainFinished { .. } => "node:drain:finished",
        }
    }

    /// Human-readable summary
    pub fn message(&self) -> String {
        match self {
            ClusterEvent::ConfigMembersAdded { hosts } => {
                let hosts: Vec<&str> = hosts.iter().map(Host::as_str).collect();
                format!("cluster hosts added: {}", hosts.join(", "))
            }
            ClusterEvent::ConfigMemberRemoved { host } => {
                format!("cluster host removed: {}", host)
            }
            ClusterEvent::TaskRetriggered { task, node } => {
                format!("task {} re-triggered on {}", task, node)
            }
            ClusterEvent::TaskRetriggerFailed { task, reason } => {
                format!("failed to re-trigger task {}: {}", task, reason)
            }
            ClusterEvent::StatusChanged { from, to } => {
                format!("node status {} -> {}", from, to)
            }
            ClusterEvent::DrainFinished {
                running,
                waited,
                timed_out,
                ..
            } => {
                let waited = humantime::format_duration(*waited);
                if *timed_out {
                    format!("drain timed out after {} with {} running", waited, running)
                } else {
                    format!("drained after {} with {} running", waited, running)
                }
            }
        }
    }
}
