// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::runner::{ExecutionError, TaskRunner};
use crate::store::{ClusterConfigStore, StoreError};
use async_trait::async_trait;
use drover_core::{ClusterConfig, TaskId};
use tracing::Instrument;

/// Wrapper that adds tracing to any TaskRunner
#[derive(Clone)]
pub struct TracedTaskRunner<R> {
    inner: R,
}

impl<R> TracedTaskRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: TaskRunner> TaskRunner for TracedTaskRunner<R> {
    async fn running_task_count(&self) -> usize {
        let count = self.inner.running_task_count().await;
        tracing::trace!(count, "running tasks");
        count
    }

    async fn trigger_task(&self, task: &TaskId) -> Result<(), ExecutionError> {
        let span = tracing::info_span!("runner.trigger", task = %task);

        async {
            tracing::info!("triggering");

            let start = std::time::Instant::now();
            let result = self.inner.trigger_task(task).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "triggered"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "trigger failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ClusterConfigStore
#[derive(Clone)]
pub struct TracedConfigStore<S> {
    inner: S,
}

impl<S> TracedConfigStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: ClusterConfigStore> ClusterConfigStore for TracedConfigStore<S> {
    async fn get(&self) -> Result<Option<ClusterConfig>, StoreError> {
        let start = std::time::Instant::now();
        let result = self.inner.get().await;
        tracing::trace!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            members = result
                .as_ref()
                .ok()
                .and_then(|c| c.as_ref().map(|c| c.members.len())),
            "loaded cluster config"
        );
        result
    }

    async fn add(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.add", members = config.members.len());

        async {
            let start = std::time::Instant::now();
            let result = self.inner.add(config).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => {
                    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "cluster config saved")
                }
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "save failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn update(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.update", members = config.members.len());

        async {
            let start = std::time::Instant::now();
            let result = self.inner.update(config).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => {
                    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "cluster config updated")
                }
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "update failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
