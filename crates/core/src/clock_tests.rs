// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn system_clock_sleep_waits() {
    let clock = SystemClock;
    let t1 = clock.now();
    clock.sleep(Duration::from_millis(5)).await;
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_millis(5));
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(60));
}

#[tokio::test]
async fn fake_clock_sleep_advances_and_records() {
    let clock = FakeClock::new();
    let t1 = clock.now();

    clock.sleep(Duration::from_secs(10)).await;
    clock.sleep(Duration::from_secs(5)).await;

    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(15));
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(10), Duration::from_secs(5)]
    );
    assert_eq!(clock.total_slept(), Duration::from_secs(15));
}

#[tokio::test]
async fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.sleep(Duration::from_secs(30)).await;
    assert_eq!(clock1.now().duration_since(t1), Duration::from_secs(30));
    assert_eq!(clock1.sleeps().len(), 1);
}
