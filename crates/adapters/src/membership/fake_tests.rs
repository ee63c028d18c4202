// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn views_share_membership_and_ownership() {
    let cluster = FakeCluster::new();
    let a = cluster.join(ClusterMember::new("a", "10.0.0.1"));
    let b = cluster.join(ClusterMember::new("b", "10.0.0.2"));
    cluster.set_owner("t-1", "b");

    assert_eq!(a.members().await.unwrap().len(), 2);
    assert_eq!(
        a.owner_of(&TaskId::new("t-1")).await.unwrap(),
        Some(NodeId::new("b"))
    );
    assert_eq!(b.local_member().id, NodeId::new("b"));
}

#[tokio::test]
async fn leave_removes_member() {
    let cluster = FakeCluster::new();
    let a = cluster.join(ClusterMember::new("a", "10.0.0.1"));
    cluster.join(ClusterMember::new("b", "10.0.0.2"));

    let left = cluster.leave(&NodeId::new("b")).unwrap();

    assert_eq!(left.host.as_str(), "10.0.0.2");
    assert_eq!(a.members().await.unwrap(), vec![a.local_member()]);
    assert!(cluster.leave(&NodeId::new("b")).is_none());
}

#[tokio::test]
async fn unowned_partition_reports_none() {
    let cluster = FakeCluster::new();
    let a = cluster.join(ClusterMember::new("a", "10.0.0.1"));
    cluster.set_owner("t-1", "a");
    cluster.clear_owner(&TaskId::new("t-1"));

    assert_eq!(a.owner_of(&TaskId::new("t-1")).await.unwrap(), None);
}

#[tokio::test]
async fn attributes_are_recorded_per_member() {
    let cluster = FakeCluster::new();
    let a = cluster.join(ClusterMember::new("a", "10.0.0.1"));

    a.set_local_attribute("node.status", "PAUSE").await.unwrap();

    assert_eq!(
        cluster.attribute(&NodeId::new("a"), "node.status").as_deref(),
        Some("PAUSE")
    );
    assert!(cluster.calls().contains(&MembershipCall::SetAttribute {
        node: NodeId::new("a"),
        key: "node.status".to_string(),
        value: "PAUSE".to_string(),
    }));
}

#[tokio::test]
async fn outage_fails_queries() {
    let cluster = FakeCluster::new();
    let a = cluster.join(ClusterMember::new("a", "10.0.0.1"));
    cluster.set_unavailable(true);

    assert!(matches!(
        a.members().await,
        Err(MembershipError::Unavailable(_))
    ));
    assert!(a.set_local_attribute("k", "v").await.is_err());
}
