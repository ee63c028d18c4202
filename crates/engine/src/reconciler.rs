// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Membership reconciler
//!
//! On join, the hosts of all live members are merged into the cluster
//! configuration. No task moves: a task keeps running on the node that
//! started it even after its partition migrates to the newcomer.
//!
//! On leave, the departed node's tasks are resumed by whichever surviving
//! node now owns each task's partition, and the departed host is dropped
//! from the configuration once no live member remains on it.

use crate::error::RuntimeError;
use crate::retrigger::TaskRetriggerCoordinator;
use drover_adapters::{ClusterConfigStore, MembershipView, NodeTaskIndex, TaskRunner};
use drover_core::{hosts_of, ClusterEvent, ClusterMember, NodeId, TaskId};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct MembershipReconciler<M, I, S, R> {
    membership: M,
    index: I,
    store: S,
    coordinator: Arc<TaskRetriggerCoordinator<R, I>>,
}

impl<M, I, S, R> MembershipReconciler<M, I, S, R>
where
    M: MembershipView,
    I: NodeTaskIndex,
    S: ClusterConfigStore,
    R: TaskRunner,
{
    pub fn new(
        membership: M,
        index: I,
        store: S,
        coordinator: Arc<TaskRetriggerCoordinator<R, I>>,
    ) -> Self {
        Self {
            membership,
            index,
            store,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &TaskRetriggerCoordinator<R, I> {
        &self.coordinator
    }

    /// Merge the hosts of `members` into the persisted cluster configuration
    pub async fn member_joined(
        &self,
        joined: &ClusterMember,
        members: &[ClusterMember],
    ) -> Result<Vec<ClusterEvent>, RuntimeError> {
        debug!(member = %joined, "member joined the cluster");

        let mut config = self.store.get().await?.unwrap_or_default();
        let added = config.absorb(hosts_of(members));
        self.store.add(&config).await?;

        if added.is_empty() {
            return Ok(Vec::new());
        }
        info!(added = ?added, "cluster hosts recorded");
        Ok(vec![ClusterEvent::ConfigMembersAdded { hosts: added }])
    }

    /// Resume the departed node's tasks owned here and forget its host
    pub async fn member_left(
        &self,
        departed: &ClusterMember,
    ) -> Result<Vec<ClusterEvent>, RuntimeError> {
        debug!(member = %departed, "member left the cluster");

        // Host bookkeeping runs even when re-triggering fails
        let retriggered = self.retrigger_departed(departed).await;
        let forgotten = self.forget_departed_host(departed).await;

        let mut events = retriggered?;
        events.extend(forgotten?);
        Ok(events)
    }

    async fn retrigger_departed(
        &self,
        departed: &ClusterMember,
    ) -> Result<Vec<ClusterEvent>, RuntimeError> {
        let departed_tasks = self.index.tasks_of(&departed.id).await?;
        if departed_tasks.is_empty() {
            debug!(member = %departed, "departed node had no tasks");
            return Ok(Vec::new());
        }

        info!(
            tasks = ?departed_tasks,
            member = %departed,
            "tasks are candidates for re-trigger, node left the cluster"
        );

        let local = self.coordinator.node().clone();
        let batch = self.coordinator.begin_leave_batch().await;
        let local_tasks = batch.local_tasks().await?;
        let mut events = Vec::new();

        for task in &departed_tasks {
            match self.owned_here(task, &local).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(reason) => {
                    events.push(ClusterEvent::TaskRetriggerFailed {
                        task: task.clone(),
                        reason,
                    });
                    continue;
                }
            }
            if local_tasks.contains(task) {
                debug!(task = %task, "task already running on this node");
                continue;
            }

            info!(task = %task, node = %local, "triggering task, partition owned here");
            match batch.trigger(task).await {
                Ok(()) => events.push(ClusterEvent::TaskRetriggered {
                    task: task.clone(),
                    node: local.clone(),
                }),
                Err(e) => {
                    error!(task = %task, error = %e, "failed to re-trigger task");
                    events.push(ClusterEvent::TaskRetriggerFailed {
                        task: task.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(events)
    }

    /// Whether this node currently owns the partition of `task`.
    ///
    /// A substrate failure is reported as the reason string so the caller can
    /// move on to the next task.
    async fn owned_here(&self, task: &TaskId, local: &NodeId) -> Result<bool, String> {
        match self.membership.owner_of(task).await {
            Ok(Some(owner)) if &owner == local => Ok(true),
            Ok(Some(owner)) => {
                debug!(task = %task, owner = %owner, "partition owned by another node");
                Ok(false)
            }
            Ok(None) => {
                debug!(task = %task, "partition has no owner yet");
                Ok(false)
            }
            Err(e) => {
                error!(task = %task, error = %e, "partition owner lookup failed");
                Err(e.to_string())
            }
        }
    }

    async fn forget_departed_host(
        &self,
        departed: &ClusterMember,
    ) -> Result<Vec<ClusterEvent>, RuntimeError> {
        let members = self.membership.members().await?;
        let live_hosts = hosts_of(members.iter().filter(|m| m.id != departed.id));
        if live_hosts.contains(&departed.host) {
            debug!(host = %departed.host, "host still has live members");
            return Ok(Vec::new());
        }

        let Some(mut config) = self.store.get().await? else {
            return Ok(Vec::new());
        };
        if !config.forget(&departed.host) {
            return Ok(Vec::new());
        }
        self.store.update(&config).await?;

        info!(host = %departed.host, "cluster host removed");
        Ok(vec![ClusterEvent::ConfigMemberRemoved {
            host: departed.host.clone(),
        }])
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
