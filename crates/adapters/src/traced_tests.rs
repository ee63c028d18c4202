// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::runner::FakeTaskRunner;
use crate::store::FakeConfigStore;
use drover_core::Host;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a future with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_runner_logs_successful_trigger() {
    let fake = FakeTaskRunner::new();
    let traced = TracedTaskRunner::new(fake.clone());

    let (logs, result) =
        with_tracing(|| async move { traced.trigger_task(&TaskId::new("t-1")).await });

    assert!(result.is_ok());
    assert!(logs.contains("runner.trigger"));
    assert!(logs.contains("t-1"));
    assert!(logs.contains("triggered"));
    assert_eq!(fake.triggered(), vec![TaskId::new("t-1")]);
}

#[test]
fn traced_runner_logs_failure_with_error() {
    let fake = FakeTaskRunner::new();
    fake.fail_task("t-bad");
    let traced = TracedTaskRunner::new(fake);

    let (logs, result) =
        with_tracing(|| async move { traced.trigger_task(&TaskId::new("t-bad")).await });

    assert!(result.is_err());
    assert!(logs.contains("trigger failed"));
    assert!(logs.contains("injected failure"));
}

#[test]
fn traced_runner_passes_count_through() {
    let fake = FakeTaskRunner::new();
    fake.set_running(4);
    let traced = TracedTaskRunner::new(fake);

    let (logs, count) = with_tracing(|| async move { traced.running_task_count().await });

    assert_eq!(count, 4);
    assert!(logs.contains("count=4"));
}

#[test]
fn traced_store_logs_writes() {
    let fake = FakeConfigStore::new();
    let traced = TracedConfigStore::new(fake.clone());
    let config = ClusterConfig::with_members([Host::new("10.0.0.1")]);

    let (logs, result) = with_tracing(|| async move { traced.add(&config).await });

    assert!(result.is_ok());
    assert!(logs.contains("store.add"));
    assert!(logs.contains("cluster config saved"));
    assert!(logs.contains("elapsed_ms="));
    assert!(fake.config().is_some());
}

#[test]
fn traced_store_logs_update_failure() {
    let fake = FakeConfigStore::new();
    let traced = TracedConfigStore::new(fake);

    let (logs, result) =
        with_tracing(|| async move { traced.update(&ClusterConfig::new()).await });

    assert!(matches!(result, Err(StoreError::NotFound)));
    assert!(logs.contains("update failed"));
    assert!(logs.contains("elapsed_ms="));
}

#[test]
fn traced_store_logs_read_timing() {
    let config = ClusterConfig::with_members([Host::new("10.0.0.1")]);
    let traced = TracedConfigStore::new(FakeConfigStore::with_config(config));

    let (logs, result) = with_tracing(|| async move { traced.get().await });

    assert_eq!(result.unwrap().map(|c| c.members.len()), Some(1));
    assert!(logs.contains("loaded cluster config"));
    assert!(logs.contains("elapsed_ms="));
    assert!(logs.contains("members=1"));
}
