// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime that dispatches membership events for one node

use crate::error::RuntimeError;
use crate::node_status::NodeStatusMachine;
use crate::reconciler::MembershipReconciler;
use crate::retrigger::TaskRetriggerCoordinator;
use drover_adapters::{ClusterConfigStore, MembershipView, NodeTaskIndex, TaskRunner};
use drover_core::{Clock, ClusterEvent, ClusterMember, DroverConfig, StatusCell};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// Events delivered by the membership substrate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipEvent {
    /// A member joined; `members` is the full live member set
    MemberJoined {
        member: ClusterMember,
        members: Vec<ClusterMember>,
    },
    /// A member left or was declared dead
    MemberLeft { member: ClusterMember },
    /// A member attribute changed
    AttributeChanged {
        member: ClusterMember,
        key: String,
        value: String,
    },
}

impl MembershipEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MembershipEvent::MemberJoined { .. } => "member:joined",
            MembershipEvent::MemberLeft { .. } => "member:left",
            MembershipEvent::AttributeChanged { .. } => "member:attribute",
        }
    }
}

/// Runtime adapter dependencies
pub struct RuntimeDeps<M, I, S, R> {
    pub membership: M,
    pub index: I,
    pub store: S,
    pub runner: R,
    /// Local status, shared with the task runner
    pub status: StatusCell,
}

/// Runtime that coordinates reconciliation and status for one node
pub struct Runtime<M, I, S, R, C: Clock> {
    reconciler: MembershipReconciler<M, I, S, R>,
    node_status: NodeStatusMachine<M, R, C>,
    status_attribute: String,
}

impl<M, I, S, R, C> Runtime<M, I, S, R, C>
where
    M: MembershipView,
    I: NodeTaskIndex,
    S: ClusterConfigStore,
    R: TaskRunner,
    C: Clock,
{
    pub fn new(deps: RuntimeDeps<M, I, S, R>, clock: C, config: DroverConfig) -> Self {
        let local = deps.membership.local_member();
        if deps.index.name() != config.node_tasks_map {
            warn!(
                expected = %config.node_tasks_map,
                actual = deps.index.name(),
                "task index name differs from configured map"
            );
        }
        info!(node = %local, node_tasks_map = deps.index.name(), "runtime created");

        let coordinator = Arc::new(TaskRetriggerCoordinator::new(
            deps.runner.clone(),
            deps.index.clone(),
            local.id,
        ));
        Self {
            reconciler: MembershipReconciler::new(
                deps.membership.clone(),
                deps.index,
                deps.store,
                coordinator,
            ),
            node_status: NodeStatusMachine::new(
                deps.membership,
                deps.runner,
                clock,
                deps.status,
                config.clone(),
            ),
            status_attribute: config.status_attribute,
        }
    }

    pub fn status(&self) -> &StatusCell {
        self.node_status.status()
    }

    pub fn reconciler(&self) -> &MembershipReconciler<M, I, S, R> {
        &self.reconciler
    }

    /// Handle an incoming membership event
    ///
    /// Returns the cluster events produced while handling it.
    pub async fn handle_event(
        &self,
        event: MembershipEvent,
    ) -> Result<Vec<ClusterEvent>, RuntimeError> {
        let span = tracing::info_span!("membership.event", event = event.name());
        self.dispatch(&event).instrument(span).await
    }

    async fn dispatch(&self, event: &MembershipEvent) -> Result<Vec<ClusterEvent>, RuntimeError> {
        match event {
            MembershipEvent::MemberJoined { member, members } => {
                self.reconciler.member_joined(member, members).await
            }
            MembershipEvent::MemberLeft { member } => self.reconciler.member_left(member).await,
            MembershipEvent::AttributeChanged { member, key, value } => {
                info!(key = %key, value = %value, member = %member, "member attribute modified");
                if key != &self.status_attribute {
                    debug!(key = %key, "not the status attribute, ignoring");
                    return Ok(Vec::new());
                }
                self.node_status.on_status_attribute(value).await
            }
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
