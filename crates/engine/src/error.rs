// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use drover_adapters::{ExecutionError, IndexError, MembershipError, StoreError};
use drover_core::{TaskId, UnknownStatus};
use thiserror::Error;

/// Failure to resume a single task on this node
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("task {task} could not be started: {source}")]
    Execution {
        task: TaskId,
        source: ExecutionError,
    },
    #[error("task {task} started but was not recorded in the task index: {source}")]
    Index { task: TaskId, source: IndexError },
}

/// Errors that abort handling of one membership or attribute event
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("cluster config persistence failed: {0}")]
    ConfigPersistence(#[from] StoreError),
    #[error("task index error: {0}")]
    Index(#[from] IndexError),
    #[error("membership error: {0}")]
    Membership(#[from] MembershipError),
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),
}
