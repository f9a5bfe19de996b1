//! E2E tests for discrete-event logging
//!
//! Drives pairing, wake, and scan events through the public aggregator API
//! and verifies bounded retention and snapshot contents.

use std::sync::Arc;

use linkmetrics::{
    AggregatorConfig, DeviceType, ManualClock, MetricsAggregator, ScanEventType,
    ScanTechnologyType, WakeEventType,
};

fn aggregator() -> MetricsAggregator {
    MetricsAggregator::with_clock(AggregatorConfig::default(), Arc::new(ManualClock::new(0)))
}

#[test]
fn test_pair_event_is_reported() {
    let aggregator = aggregator();
    aggregator.log_pair_event(35, 12_345, 42, DeviceType::Bredr);

    let snapshot = aggregator.write_snapshot(false);
    assert_eq!(snapshot.pair_events.len(), 1);
    let event = &snapshot.pair_events[0];
    assert_eq!(event.disconnect_reason, 35);
    assert_eq!(event.event_time_ms, 12_345);
    assert_eq!(event.device.device_class, 42);
    assert_eq!(event.device.device_type, DeviceType::Bredr);
}

#[test]
fn test_wake_event_is_reported() {
    let aggregator = aggregator();
    aggregator.log_wake_event(WakeEventType::Acquired, "TEST_REQ", "TEST_NAME", 12_345);

    let snapshot = aggregator.write_snapshot(false);
    assert_eq!(snapshot.wake_events.len(), 1);
    let event = &snapshot.wake_events[0];
    assert_eq!(event.event_type, WakeEventType::Acquired);
    assert_eq!(event.requestor, "TEST_REQ");
    assert_eq!(event.name, "TEST_NAME");
    assert_eq!(event.event_time_ms, 12_345);
}

#[test]
fn test_scan_event_stop_edge_carries_results() {
    let aggregator = aggregator();
    aggregator.log_scan_event(false, "TEST_INITIATOR", ScanTechnologyType::Bredr, 42, 123_456);

    let snapshot = aggregator.write_snapshot(false);
    assert_eq!(snapshot.scan_events.len(), 1);
    let event = &snapshot.scan_events[0];
    assert_eq!(event.event_type, ScanEventType::Stop);
    assert_eq!(event.initiator, "TEST_INITIATOR");
    assert_eq!(event.technology, ScanTechnologyType::Bredr);
    assert_eq!(event.num_results, 42);
}

#[test]
fn test_five_hundred_wake_events_keep_only_newest_fifty() {
    let aggregator = aggregator();
    for i in 0..500i64 {
        let event_type = if i % 2 == 0 {
            WakeEventType::Acquired
        } else {
            WakeEventType::Released
        };
        aggregator.log_wake_event(event_type, "TEST_REQ", "TEST_NAME", i);
    }

    let snapshot = aggregator.write_snapshot(false);
    assert_eq!(snapshot.wake_events.len(), 50);
    for (offset, event) in snapshot.wake_events.iter().enumerate() {
        let i = 450 + offset as i64;
        assert_eq!(event.event_time_ms, i, "events must stay in insertion order");
        let expected = if i % 2 == 0 {
            WakeEventType::Acquired
        } else {
            WakeEventType::Released
        };
        assert_eq!(event.event_type, expected);
    }
}

#[test]
fn test_event_log_capacities_are_independent() {
    let config = AggregatorConfig {
        pair_log_capacity: 2,
        wake_log_capacity: 5,
        scan_log_capacity: 50,
    };
    let aggregator = MetricsAggregator::with_clock(config, Arc::new(ManualClock::new(0)));

    for i in 0..10i64 {
        aggregator.log_pair_event(0, i, 42, DeviceType::Le);
        aggregator.log_wake_event(WakeEventType::Acquired, "r", "n", i);
        aggregator.log_scan_event(true, "s", ScanTechnologyType::Le, 0, i);
    }

    let snapshot = aggregator.write_snapshot(false);
    assert_eq!(snapshot.pair_events.len(), 2);
    assert_eq!(snapshot.wake_events.len(), 5);
    assert_eq!(snapshot.scan_events.len(), 10);
    assert_eq!(snapshot.pair_events[0].event_time_ms, 8);
    assert_eq!(snapshot.wake_events[0].event_time_ms, 5);
}

#[test]
fn test_snapshot_without_drain_retains_events() {
    let aggregator = aggregator();
    aggregator.log_wake_event(WakeEventType::Acquired, "r", "n", 1);

    assert_eq!(aggregator.write_snapshot(false).wake_events.len(), 1);
    assert_eq!(
        aggregator.write_snapshot(false).wake_events.len(),
        1,
        "a plain snapshot must not consume events"
    );
}
