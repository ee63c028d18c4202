// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the cluster substrate and the task runner

pub mod membership;
pub mod runner;
pub mod store;
pub mod task_index;
pub mod traced;

pub use membership::{MembershipError, MembershipView};
pub use runner::{ExecutionError, TaskRunner};
pub use store::{ClusterConfigStore, JsonConfigStore, StoreError};
pub use task_index::{InMemoryTaskIndex, IndexError, NodeTaskIndex};
pub use traced::{TracedConfigStore, TracedTaskRunner};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use membership::{FakeCluster, FakeMembership, MembershipCall};
#[cfg(any(test, feature = "test-support"))]
pub use runner::{FakeTaskRunner, RunnerCall};
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeConfigStore, StoreCall};
