// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster members and the persisted cluster configuration
//!
//! Members are ephemeral and supplied by the membership substrate with each
//! event. The cluster configuration only remembers their hosts, so it is
//! keyed by host rather than by member id.

use crate::id::{Host, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A member of the cluster as reported by the membership substrate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterMember {
    pub id: NodeId,
    pub host: Host,
}

impl ClusterMember {
    pub fn new(id: impl Into<NodeId>, host: impl Into<Host>) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
        }
    }
}

impl std::fmt::Display for ClusterMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.host)
    }
}

/// Collect the distinct hosts of a member list
pub fn hosts_of<'a>(members: impl IntoIterator<Item = &'a ClusterMember>) -> BTreeSet<Host> {
    members.into_iter().map(|m| m.host.clone()).collect()
}

/// Persisted record of the hosts that make up the cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub members: BTreeSet<Host>,
}

impl ClusterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(hosts: impl IntoIterator<Item = Host>) -> Self {
        Self {
            members: hosts.into_iter().collect(),
        }
    }

    /// Union hosts into the configuration.
    ///
    /// Returns the hosts that were not already present.
    pub fn absorb(&mut self, hosts: impl IntoIterator<Item = Host>) -> Vec<Host> {
        hosts
            .into_iter()
            .filter(|host| self.members.insert(host.clone()))
            .collect()
    }

    /// Remove a host, returning whether it was present
    pub fn forget(&mut self, host: &Host) -> bool {
        self.members.remove(host)
    }

    pub fn contains(&self, host: &Host) -> bool {
        self.members.contains(host)
    }
}

#[cfg(test)]
#[path = "member_tests.rs"]
mod tests;
