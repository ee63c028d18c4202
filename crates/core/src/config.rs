// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration constants for reconciliation and draining
//!
//! Durations are written as human-readable strings:
//!
//! ```toml
//! max_drain_wait = "30m"
//! poll_interval = "10s"
//! drain_threshold = 1
//! status_attribute = "node.status"
//! node_tasks_map = "node-tasks"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("poll_interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DroverConfig {
    /// Total time to wait for running tasks before entering maintenance mode
    #[serde(with = "humantime_serde")]
    pub max_drain_wait: Duration,
    /// Interval between running-task checks while draining
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Drain ends once the running-task count is at or below this value.
    /// The count includes the entry of the draining control task itself.
    pub drain_threshold: usize,
    /// Member attribute key carrying the node status
    pub status_attribute: String,
    /// Well-known name of the node task index map
    pub node_tasks_map: String,
}

impl Default for DroverConfig {
    fn default() -> Self {
        Self {
            max_drain_wait: Duration::from_secs(30 * 60),
            poll_interval: Duration::from_secs(10),
            drain_threshold: 1,
            status_attribute: "node.status".to_string(),
            node_tasks_map: "node-tasks".to_string(),
        }
    }
}

impl DroverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Number of polls the drain wait may perform
    pub fn max_poll_iterations(&self) -> u32 {
        if self.poll_interval.is_zero() {
            return 0;
        }
        let polls = self.max_drain_wait.as_nanos() / self.poll_interval.as_nanos();
        u32::try_from(polls).unwrap_or(u32::MAX)
    }

    pub fn with_max_drain_wait(mut self, wait: Duration) -> Self {
        self.max_drain_wait = wait;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_drain_threshold(mut self, threshold: usize) -> Self {
        self.drain_threshold = threshold;
        self
    }

    pub fn with_status_attribute(mut self, key: impl Into<String>) -> Self {
        self.status_attribute = key.into();
        self
    }

    pub fn with_node_tasks_map(mut self, name: impl Into<String>) -> Self {
        self.node_tasks_map = name.into();
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
