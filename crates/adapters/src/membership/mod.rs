// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster membership substrate
//!
//! The substrate detects joins and leaves, owns the partition table, and
//! replicates member attributes. This crate only consumes it.

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCluster, FakeMembership, MembershipCall};

use async_trait::async_trait;
use drover_core::{ClusterMember, NodeId, TaskId};
use thiserror::Error;

/// Errors from the membership substrate
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("membership substrate unavailable: {0}")]
    Unavailable(String),
    #[error("attribute publish failed: {0}")]
    PublishFailed(String),
}

/// This node's view of the cluster
#[async_trait]
pub trait MembershipView: Clone + Send + Sync + 'static {
    /// The member this process runs as
    fn local_member(&self) -> ClusterMember;

    /// Members currently alive, including the local one
    async fn members(&self) -> Result<Vec<ClusterMember>, MembershipError>;

    /// Current partition owner of a task key.
    ///
    /// `None` while the partition has no owner (e.g. mid-migration).
    async fn owner_of(&self, task: &TaskId) -> Result<Option<NodeId>, MembershipError>;

    /// Publish an attribute on the local member, visible cluster-wide
    async fn set_local_attribute(&self, key: &str, value: &str) -> Result<(), MembershipError>;
}
