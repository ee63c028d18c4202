// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-local task index

use super::{IndexError, NodeTaskIndex};
use async_trait::async_trait;
use drover_core::{NodeId, TaskId};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct IndexState {
    entries: HashMap<NodeId, BTreeSet<TaskId>>,
    unavailable: bool,
}

/// Task index held in memory and shared between clones.
///
/// Clones handed to several nodes stand in for one distributed map.
#[derive(Clone)]
pub struct InMemoryTaskIndex {
    name: Arc<str>,
    state: Arc<Mutex<IndexState>>,
}

impl InMemoryTaskIndex {
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            state: Arc::new(Mutex::new(IndexState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace a node's entry
    pub fn assign<I, T>(&self, node: impl Into<NodeId>, tasks: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        let tasks = tasks.into_iter().map(Into::into).collect();
        self.lock().entries.insert(node.into(), tasks);
    }

    /// Drop a node's entry, returning its tasks
    pub fn remove_node(&self, node: &NodeId) -> BTreeSet<TaskId> {
        self.lock().entries.remove(node).unwrap_or_default()
    }

    /// Make every access fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    fn check_available(&self, state: &IndexState) -> Result<(), IndexError> {
        if state.unavailable {
            return Err(IndexError::Unavailable {
                map: self.name.to_string(),
                reason: "index offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NodeTaskIndex for InMemoryTaskIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn tasks_of(&self, node: &NodeId) -> Result<BTreeSet<TaskId>, IndexError> {
        let state = self.lock();
        self.check_available(&state)?;
        Ok(state.entries.get(node).cloned().unwrap_or_default())
    }

    async fn add_task(&self, node: &NodeId, task: &TaskId) -> Result<(), IndexError> {
        let mut state = self.lock();
        self.check_available(&state)?;
        state
            .entries
            .entry(node.clone())
            .or_default()
            .insert(task.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
