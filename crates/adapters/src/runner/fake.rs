// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake task runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ExecutionError, TaskRunner};
use async_trait::async_trait;
use drover_core::TaskId;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded runner call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCall {
    RunningTaskCount,
    TriggerTask { task: TaskId },
}

#[derive(Default)]
struct RunnerState {
    running: usize,
    scripted_counts: VecDeque<usize>,
    failing: HashSet<TaskId>,
    triggered: Vec<TaskId>,
    calls: Vec<RunnerCall>,
}

/// Fake task runner with scripted running counts and failure injection
#[derive(Clone, Default)]
pub struct FakeTaskRunner {
    state: Arc<Mutex<RunnerState>>,
}

impl FakeTaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RunnerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Running count reported once scripted counts are exhausted
    pub fn set_running(&self, running: usize) {
        self.lock().running = running;
    }

    /// Counts reported by successive queries, before falling back to `set_running`
    pub fn script_counts(&self, counts: impl IntoIterator<Item = usize>) {
        self.lock().scripted_counts.extend(counts);
    }

    /// Make triggering `task` fail
    pub fn fail_task(&self, task: impl Into<TaskId>) {
        self.lock().failing.insert(task.into());
    }

    /// Tasks successfully triggered, in order
    pub fn triggered(&self) -> Vec<TaskId> {
        self.lock().triggered.clone()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RunnerCall> {
        self.lock().calls.clone()
    }

    pub fn count_queries(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, RunnerCall::RunningTaskCount))
            .count()
    }
}

#[async_trait]
impl TaskRunner for FakeTaskRunner {
    async fn running_task_count(&self) -> usize {
        let mut state = self.lock();
        state.calls.push(RunnerCall::RunningTaskCount);
        match state.scripted_counts.pop_front() {
            Some(count) => count,
            None => state.running,
        }
    }

    async fn trigger_task(&self, task: &TaskId) -> Result<(), ExecutionError> {
        let mut state = self.lock();
        state
            .calls
            .push(RunnerCall::TriggerTask { task: task.clone() });
        if state.failing.contains(task) {
            return Err(ExecutionError::StartFailed {
                task: task.clone(),
                reason: "injected failure".to_string(),
            });
        }
        state.triggered.push(task.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
