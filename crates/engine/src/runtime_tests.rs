// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tests

use super::*;
use drover_adapters::{
    FakeCluster, FakeConfigStore, FakeMembership, FakeTaskRunner, InMemoryTaskIndex,
};
use drover_core::{FakeClock, NodeId, NodeStatus, TaskId};
use std::time::Duration;

type TestRuntime =
    Runtime<FakeMembership, InMemoryTaskIndex, FakeConfigStore, FakeTaskRunner, FakeClock>;

struct Harness {
    cluster: FakeCluster,
    index: InMemoryTaskIndex,
    store: FakeConfigStore,
    runner: FakeTaskRunner,
    clock: FakeClock,
    runtime: TestRuntime,
}

fn setup() -> Harness {
    let cluster = FakeCluster::new();
    let index = InMemoryTaskIndex::new("node-tasks");
    let store = FakeConfigStore::new();
    let runner = FakeTaskRunner::new();
    let clock = FakeClock::new();
    let config = DroverConfig::new()
        .with_max_drain_wait(Duration::from_secs(60))
        .with_poll_interval(Duration::from_secs(10));

    let runtime = Runtime::new(
        RuntimeDeps {
            membership: cluster.join(ClusterMember::new("a", "10.0.0.1")),
            index: index.clone(),
            store: store.clone(),
            runner: runner.clone(),
            status: StatusCell::default(),
        },
        clock.clone(),
        config,
    );

    Harness {
        cluster,
        index,
        store,
        runner,
        clock,
        runtime,
    }
}

fn attribute(key: &str, value: &str) -> MembershipEvent {
    MembershipEvent::AttributeChanged {
        member: ClusterMember::new("b", "10.0.0.2"),
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[tokio::test]
async fn join_event_updates_cluster_config() {
    let h = setup();
    let joined = ClusterMember::new("b", "10.0.0.2");
    let members = vec![ClusterMember::new("a", "10.0.0.1"), joined.clone()];

    let events = h
        .runtime
        .handle_event(MembershipEvent::MemberJoined {
            member: joined,
            members,
        })
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(h.store.config().unwrap().members.len(), 2);
}

#[tokio::test]
async fn leave_event_retriggers_owned_tasks() {
    let h = setup();
    let departed = ClusterMember::new("b", "10.0.0.2");
    h.cluster.join(departed.clone());
    h.cluster.leave(&departed.id);
    h.index.assign("b", ["t-1"]);
    h.cluster.set_owner("t-1", "a");

    h.runtime
        .handle_event(MembershipEvent::MemberLeft { member: departed })
        .await
        .unwrap();

    assert_eq!(h.runner.triggered(), vec![TaskId::new("t-1")]);
    assert_eq!(h.runtime.reconciler().coordinator().node(), &NodeId::new("a"));
}

#[tokio::test]
async fn unrelated_attribute_is_ignored() {
    let h = setup();

    let events = h
        .runtime
        .handle_event(attribute("rack", "MAINTENANCE_MODE"))
        .await
        .unwrap();

    assert!(events.is_empty());
    assert_eq!(h.runtime.status().get(), NodeStatus::Active);
    assert_eq!(h.runner.count_queries(), 0);
}

#[tokio::test]
async fn status_attribute_from_any_member_drives_local_status() {
    let h = setup();
    h.runner.set_running(3);

    h.runtime
        .handle_event(attribute("node.status", "MAINTENANCE_MODE"))
        .await
        .unwrap();

    assert_eq!(h.runtime.status().get(), NodeStatus::MaintenanceMode);
    assert_eq!(h.clock.sleeps().len(), 6);
    assert_eq!(
        h.cluster
            .attribute(&NodeId::new("a"), "node.status")
            .as_deref(),
        Some("MAINTENANCE_MODE")
    );
}

#[tokio::test]
async fn echo_of_own_publish_is_harmless() {
    let h = setup();
    h.runner.set_running(0);

    h.runtime
        .handle_event(attribute("node.status", "MAINTENANCE_MODE"))
        .await
        .unwrap();
    let events = h
        .runtime
        .handle_event(attribute("node.status", "MAINTENANCE_MODE"))
        .await
        .unwrap();

    assert!(events.is_empty());
    assert_eq!(h.runner.count_queries(), 1);
}

#[tokio::test]
async fn unknown_status_value_is_an_error() {
    let h = setup();

    let err = h
        .runtime
        .handle_event(attribute("node.status", "HALTED"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("HALTED"));
    assert_eq!(h.runtime.status().get(), NodeStatus::Active);
}

#[tokio::test]
async fn store_failure_surfaces_to_caller() {
    let h = setup();
    h.store.fail_writes(true);
    let joined = ClusterMember::new("b", "10.0.0.2");

    let err = h
        .runtime
        .handle_event(MembershipEvent::MemberJoined {
            member: joined.clone(),
            members: vec![joined],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::ConfigPersistence(_)));
    assert!(h.store.config().is_none());
    assert!(!h.store.calls().is_empty());
}

#[test]
fn event_names() {
    let member = ClusterMember::new("a", "h");
    assert_eq!(
        MembershipEvent::MemberLeft { member }.name(),
        "member:left"
    );
    assert_eq!(attribute("k", "v").name(), "member:attribute");
}
