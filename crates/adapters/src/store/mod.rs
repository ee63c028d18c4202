// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence for the cluster configuration

mod json;

pub use json::JsonConfigStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeConfigStore, StoreCall};

use async_trait::async_trait;
use drover_core::ClusterConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cluster configuration not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Store holding the single cluster configuration record
#[async_trait]
pub trait ClusterConfigStore: Clone + Send + Sync + 'static {
    /// Current configuration, `None` before it is first added
    async fn get(&self) -> Result<Option<ClusterConfig>, StoreError>;

    /// Create or replace the configuration
    async fn add(&self, config: &ClusterConfig) -> Result<(), StoreError>;

    /// Replace an existing configuration
    async fn update(&self, config: &ClusterConfig) -> Result<(), StoreError>;
}
