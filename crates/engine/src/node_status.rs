// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node status state machine
//!
//! Reacts to changes of the node-status member attribute. Entering
//! maintenance mode first pauses the node, then waits (bounded) for running
//! tasks to drain before publishing `MAINTENANCE_MODE`. Any other target is
//! adopted immediately. A started drain always runs to completion; a
//! different status arriving meanwhile is handled after it.

use crate::error::RuntimeError;
use drover_adapters::{MembershipView, TaskRunner};
use drover_core::{BoundedWait, Clock, ClusterEvent, DroverConfig, NodeStatus, StatusCell};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct NodeStatusMachine<M, R, C: Clock> {
    membership: M,
    runner: R,
    clock: C,
    status: StatusCell,
    config: DroverConfig,
    /// Serializes transitions so a drain cannot be preempted
    transition: Mutex<()>,
}

impl<M, R, C> NodeStatusMachine<M, R, C>
where
    M: MembershipView,
    R: TaskRunner,
    C: Clock,
{
    pub fn new(
        membership: M,
        runner: R,
        clock: C,
        status: StatusCell,
        config: DroverConfig,
    ) -> Self {
        Self {
            membership,
            runner,
            clock,
            status,
            config,
            transition: Mutex::new(()),
        }
    }

    pub fn status(&self) -> &StatusCell {
        &self.status
    }

    /// Handle a new value of the status attribute
    pub async fn on_status_attribute(
        &self,
        value: &str,
    ) -> Result<Vec<ClusterEvent>, RuntimeError> {
        let target: NodeStatus = value.parse()?;
        let _transition = self.transition.lock().await;

        let current = self.status.get();
        if target == NodeStatus::MaintenanceMode && current != NodeStatus::MaintenanceMode {
            self.enter_maintenance().await
        } else {
            let events: Vec<ClusterEvent> = self.set_local(target).into_iter().collect();
            self.publish(target).await?;
            Ok(events)
        }
    }

    async fn enter_maintenance(&self) -> Result<Vec<ClusterEvent>, RuntimeError> {
        let mut events = Vec::new();
        events.extend(self.set_local(NodeStatus::Pause));

        events.push(self.drain().await);

        // Local state first, so the echo of our own publish is a no-op
        events.extend(self.set_local(NodeStatus::MaintenanceMode));
        self.publish(NodeStatus::MaintenanceMode).await?;
        Ok(events)
    }

    /// Wait for running tasks to finish, bounded by the configured budget
    pub async fn drain(&self) -> ClusterEvent {
        let wait = BoundedWait::new(
            self.clock.clone(),
            self.config.poll_interval,
            self.config.max_poll_iterations(),
        );
        info!(
            budget = ?wait.budget(),
            interval = ?self.config.poll_interval,
            "waiting for running tasks to complete"
        );

        let start = self.clock.now();
        let last_count = AtomicUsize::new(0);
        let runner = &self.runner;
        let seen = &last_count;
        let threshold = self.config.drain_threshold;

        let outcome = wait
            .until(move || async move {
                let running = runner.running_task_count().await;
                seen.store(running, Ordering::SeqCst);
                running <= threshold
            })
            .await;

        let running = last_count.load(Ordering::SeqCst);
        let waited = self.clock.now().saturating_duration_since(start);
        if outcome.satisfied {
            info!(running, polls = outcome.polls, "running tasks drained");
        } else {
            warn!(
                running,
                polls = outcome.polls,
                "drain budget exhausted, tasks still running"
            );
        }

        ClusterEvent::DrainFinished {
            polls: outcome.polls,
            running,
            waited,
            timed_out: !outcome.satisfied,
        }
    }

    fn set_local(&self, status: NodeStatus) -> Option<ClusterEvent> {
        let previous = self.status.set(status);
        if previous == status {
            return None;
        }
        info!(from = %previous, to = %status, "node status changed");
        Some(ClusterEvent::StatusChanged {
            from: previous,
            to: status,
        })
    }

    async fn publish(&self, status: NodeStatus) -> Result<(), RuntimeError> {
        self.membership
            .set_local_attribute(&self.config.status_attribute, status.as_str())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "node_status_tests.rs"]
mod tests;
