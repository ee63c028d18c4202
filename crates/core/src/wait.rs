// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded polling wait
//!
//! Checks a condition, then sleeps a fixed interval between re-checks until
//! the condition holds, the poll budget or deadline is exhausted, or the
//! wait is cancelled. The condition is always checked once before the first
//! sleep, so an already-satisfied wait never sleeps.

use crate::clock::Clock;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cancels a [`BoundedWait`] at its next poll
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How a bounded wait ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOutcome {
    /// Number of interval sleeps performed
    pub polls: u32,
    /// The condition held when the wait ended
    pub satisfied: bool,
    /// The wait was cancelled before the condition held
    pub cancelled: bool,
}

impl WaitOutcome {
    pub fn timed_out(&self) -> bool {
        !self.satisfied && !self.cancelled
    }
}

/// Polls a condition at a fixed interval, at most `max_polls` times
pub struct BoundedWait<C: Clock> {
    clock: C,
    interval: Duration,
    max_polls: u32,
    cancel: CancelHandle,
}

impl<C: Clock> BoundedWait<C> {
    pub fn new(clock: C, interval: Duration, max_polls: u32) -> Self {
        Self {
            clock,
            interval,
            max_polls,
            cancel: CancelHandle::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that cancels this wait
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Total time budget of the wait
    pub fn budget(&self) -> Duration {
        self.interval
            .checked_mul(self.max_polls)
            .unwrap_or(Duration::MAX)
    }

    /// Wait until `condition` resolves to true
    pub async fn until<F, Fut>(&self, mut condition: F) -> WaitOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        let deadline = self.clock.now().checked_add(self.budget());
        let mut polls = 0;

        loop {
            if condition().await {
                return WaitOutcome {
                    polls,
                    satisfied: true,
                    cancelled: false,
                };
            }
            if self.cancel.is_cancelled() {
                return WaitOutcome {
                    polls,
                    satisfied: false,
                    cancelled: true,
                };
            }
            let past_deadline = deadline.is_some_and(|d| self.clock.now() >= d);
            if polls >= self.max_polls || past_deadline {
                return WaitOutcome {
                    polls,
                    satisfied: false,
                    cancelled: false,
                };
            }
            self.clock.sleep(self.interval).await;
            polls += 1;
        }
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
