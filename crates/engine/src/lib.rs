// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Membership reconciliation and node status engine
//!
//! Every surviving node runs the same handlers independently. A task of a
//! departed node is resumed only by the node that currently owns the task's
//! partition, so no leader is needed.

mod error;
mod node_status;
mod reconciler;
mod retrigger;
mod runtime;

pub use error::{RuntimeError, TriggerError};
pub use node_status::NodeStatusMachine;
pub use reconciler::MembershipReconciler;
pub use retrigger::{LeaveBatch, TaskRetriggerCoordinator};
pub use runtime::{MembershipEvent, Runtime, RuntimeDeps};
