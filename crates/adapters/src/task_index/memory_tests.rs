// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn missing_node_has_no_tasks() {
    let index = InMemoryTaskIndex::new("node-tasks");
    let tasks = index.tasks_of(&NodeId::new("ghost")).await.unwrap();
    assert!(tasks.is_empty());
    assert_eq!(index.name(), "node-tasks");
}

#[tokio::test]
async fn add_task_extends_entry() {
    let index = InMemoryTaskIndex::new("node-tasks");
    index.assign("a", ["t-1"]);

    index
        .add_task(&NodeId::new("a"), &TaskId::new("t-2"))
        .await
        .unwrap();
    index
        .add_task(&NodeId::new("a"), &TaskId::new("t-2"))
        .await
        .unwrap();

    let tasks = index.tasks_of(&NodeId::new("a")).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.contains(&TaskId::new("t-2")));
}

#[tokio::test]
async fn clones_share_entries() {
    let index = InMemoryTaskIndex::new("node-tasks");
    let other = index.clone();

    other.assign("b", ["t-9"]);

    let tasks = index.tasks_of(&NodeId::new("b")).await.unwrap();
    assert!(tasks.contains(&TaskId::new("t-9")));
    assert_eq!(index.remove_node(&NodeId::new("b")).len(), 1);
    assert!(other.tasks_of(&NodeId::new("b")).await.unwrap().is_empty());
}

#[tokio::test]
async fn unavailable_index_errors() {
    let index = InMemoryTaskIndex::new("node-tasks");
    index.set_unavailable(true);

    let err = index.tasks_of(&NodeId::new("a")).await.unwrap_err();
    assert!(err.to_string().contains("node-tasks"));
}
