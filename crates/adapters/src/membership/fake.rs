// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake membership substrate for testing
//!
//! One [`FakeCluster`] holds the shared partition table and member list;
//! each node gets its own [`FakeMembership`] view onto it.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MembershipError, MembershipView};
use async_trait::async_trait;
use drover_core::{ClusterMember, NodeId, TaskId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded membership call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipCall {
    Members { from: NodeId },
    OwnerOf { from: NodeId, task: TaskId },
    SetAttribute { node: NodeId, key: String, value: String },
}

#[derive(Default)]
struct ClusterState {
    members: Vec<ClusterMember>,
    owners: HashMap<TaskId, NodeId>,
    attributes: HashMap<(NodeId, String), String>,
    unavailable: bool,
    calls: Vec<MembershipCall>,
}

/// Shared in-memory cluster
#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<ClusterState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ClusterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a member and return its view of the cluster
    pub fn join(&self, member: ClusterMember) -> FakeMembership {
        let mut state = self.lock();
        if !state.members.contains(&member) {
            state.members.push(member.clone());
        }
        FakeMembership {
            cluster: self.clone(),
            local: member,
        }
    }

    /// Remove a member, returning it if it was present
    pub fn leave(&self, node: &NodeId) -> Option<ClusterMember> {
        let mut state = self.lock();
        let index = state.members.iter().position(|m| &m.id == node)?;
        Some(state.members.remove(index))
    }

    pub fn members(&self) -> Vec<ClusterMember> {
        self.lock().members.clone()
    }

    /// Assign the partition holding `task` to `node`
    pub fn set_owner(&self, task: impl Into<TaskId>, node: impl Into<NodeId>) {
        self.lock().owners.insert(task.into(), node.into());
    }

    /// Leave the partition holding `task` without an owner
    pub fn clear_owner(&self, task: &TaskId) {
        self.lock().owners.remove(task);
    }

    /// Value of an attribute published by `node`
    pub fn attribute(&self, node: &NodeId, key: &str) -> Option<String> {
        self.lock()
            .attributes
            .get(&(node.clone(), key.to_string()))
            .cloned()
    }

    /// Make every substrate query fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<MembershipCall> {
        self.lock().calls.clone()
    }
}

/// One node's view of a [`FakeCluster`]
#[derive(Clone)]
pub struct FakeMembership {
    cluster: FakeCluster,
    local: ClusterMember,
}

impl FakeMembership {
    pub fn cluster(&self) -> &FakeCluster {
        &self.cluster
    }
}

#[async_trait]
impl MembershipView for FakeMembership {
    fn local_member(&self) -> ClusterMember {
        self.local.clone()
    }

    async fn members(&self) -> Result<Vec<ClusterMember>, MembershipError> {
        let mut state = self.cluster.lock();
        state.calls.push(MembershipCall::Members {
            from: self.local.id.clone(),
        });
        if state.unavailable {
            return Err(MembershipError::Unavailable("fake outage".to_string()));
        }
        Ok(state.members.clone())
    }

    async fn owner_of(&self, task: &TaskId) -> Result<Option<NodeId>, MembershipError> {
        let mut state = self.cluster.lock();
        state.calls.push(MembershipCall::OwnerOf {
            from: self.local.id.clone(),
            task: task.clone(),
        });
        if state.unavailable {
            return Err(MembershipError::Unavailable("fake outage".to_string()));
        }
        Ok(state.owners.get(task).cloned())
    }

    async fn set_local_attribute(&self, key: &str, value: &str) -> Result<(), MembershipError> {
        let mut state = self.cluster.lock();
        state.calls.push(MembershipCall::SetAttribute {
            node: self.local.id.clone(),
            key: key.to_string(),
            value: value.to_string(),
        });
        if state.unavailable {
            return Err(MembershipError::PublishFailed("fake outage".to_string()));
        }
        state
            .attributes
            .insert((self.local.id.clone(), key.to_string()), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
