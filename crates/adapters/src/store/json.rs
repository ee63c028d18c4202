// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-backed cluster configuration

use super::{ClusterConfigStore, StoreError};
use async_trait::async_trait;
use drover_core::ClusterConfig;
use std::path::{Path, PathBuf};

/// Stores the configuration as a pretty-printed JSON file
#[derive(Clone, Debug)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(config)?;
        // Write then rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ClusterConfigStore for JsonConfigStore {
    async fn get(&self) -> Result<Option<ClusterConfig>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        self.write(config).await
    }

    async fn update(&self, config: &ClusterConfig) -> Result<(), StoreError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(StoreError::NotFound);
        }
        self.write(config).await
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
