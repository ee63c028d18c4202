// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-core: shared types for cluster membership reconciliation
//!
//! This crate provides:
//! - Identifiers for nodes, tasks, and hosts
//! - Cluster members and the persisted host-keyed cluster configuration
//! - The node status enumeration and its shared, observable state cell
//! - Clock abstraction and a bounded polling wait
//! - Events emitted by reconciliation and status transitions
//! - Configuration constants

pub mod clock;
pub mod config;
pub mod event;
pub mod id;
pub mod member;
pub mod status;
pub mod wait;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, DroverConfig};
pub use event::ClusterEvent;
pub use id::{Host, NodeId, TaskId};
pub use member::{hosts_of, ClusterConfig, ClusterMember};
pub use status::{NodeStatus, StatusCell, UnknownStatus};
pub use wait::{BoundedWait, CancelHandle, WaitOutcome};
