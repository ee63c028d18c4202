// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake cluster configuration store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClusterConfigStore, StoreError};
use async_trait::async_trait;
use drover_core::ClusterConfig;
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get,
    Add(ClusterConfig),
    Update(ClusterConfig),
}

#[derive(Default)]
struct StoreState {
    config: Option<ClusterConfig>,
    fail_writes: bool,
    calls: Vec<StoreCall>,
}

/// In-memory store with write-failure injection
#[derive(Clone, Default)]
pub struct FakeConfigStore {
    state: Arc<Mutex<StoreState>>,
}

impl FakeConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClusterConfig) -> Self {
        let store = Self::new();
        store.lock().config = Some(config);
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Currently stored configuration
    pub fn config(&self) -> Option<ClusterConfig> {
        self.lock().config.clone()
    }

    /// Make add and update fail
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of add/update calls that were attempted
    pub fn write_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| !matches!(c, StoreCall::Get))
            .count()
    }
}

#[async_trait]
impl ClusterConfigStore for FakeConfigStore {
    async fn get(&self) -> Result<Option<ClusterConfig>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Get);
        Ok(state.config.clone())
    }

    async fn add(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Add(config.clone()));
        if state.fail_writes {
            return Err(StoreError::Unavailable("fake write failure".to_string()));
        }
        state.config = Some(config.clone());
        Ok(())
    }

    async fn update(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Update(config.clone()));
        if state.fail_writes {
            return Err(StoreError::Unavailable("fake write failure".to_string()));
        }
        if state.config.is_none() {
            return Err(StoreError::NotFound);
        }
        state.config = Some(config.clone());
        Ok(())
    }
}
