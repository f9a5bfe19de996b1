//! Process-wide metrics aggregation
//!
//! One [`SessionTracker`] plus one bounded log per discrete event kind,
//! behind a single mutex. Every mutator and the snapshot path lock the whole
//! state, so a snapshot always observes some serializable interleaving of
//! completed log calls; no event or partial merge is torn across a snapshot
//! boundary. Lock hold times are bounded by the event-log capacities.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::AggregatorConfig;
use crate::events::log::BoundedEventLog;
use crate::events::{
    PairEvent, ScanEvent, ScanEventType, ScanTechnologyType, WakeEvent, WakeEventType,
};
use crate::session::stats::AudioSessionStats;
use crate::session::tracker::SessionTracker;
use crate::session::{ConnectionTechnologyType, DeviceInfo, DeviceType, SessionRecord};

/// Consistent view of the aggregator's state at one instant.
///
/// `sessions` holds completed sessions in completion order; if a session is
/// open when the snapshot is taken, a synthetic trailing entry describes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSnapshot {
    pub sessions: Vec<SessionRecord>,
    pub pair_events: Vec<PairEvent>,
    pub wake_events: Vec<WakeEvent>,
    pub scan_events: Vec<ScanEvent>,
}

impl LogSnapshot {
    /// True when the snapshot carries no records of any kind.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
            && self.pair_events.is_empty()
            && self.wake_events.is_empty()
            && self.scan_events.is_empty()
    }
}

/// State guarded by the aggregator's mutex.
struct Inner {
    tracker: SessionTracker,
    pair_log: BoundedEventLog<PairEvent>,
    wake_log: BoundedEventLog<WakeEvent>,
    scan_log: BoundedEventLog<ScanEvent>,
}

impl Inner {
    fn new(config: &AggregatorConfig) -> Self {
        Self {
            tracker: SessionTracker::new(),
            pair_log: BoundedEventLog::new(config.pair_log_capacity),
            wake_log: BoundedEventLog::new(config.wake_log_capacity),
            scan_log: BoundedEventLog::new(config.scan_log_capacity),
        }
    }
}

/// Thread-safe telemetry aggregator shared by the whole connectivity stack.
///
/// Call sites pass data by value; the aggregator owns every record it
/// stores. Construct one per process and share it behind an `Arc`.
pub struct MetricsAggregator {
    clock: Arc<dyn Clock>,
    config: AggregatorConfig,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for MetricsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsAggregator")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}

impl MetricsAggregator {
    /// Aggregator with the given capacities, stamped by wall-clock time.
    pub fn new(config: AggregatorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Aggregator with an injected clock; tests and simulations use this.
    pub fn with_clock(config: AggregatorConfig, clock: Arc<dyn Clock>) -> Self {
        let inner = Inner::new(&config);
        Self {
            clock,
            config,
            inner: Mutex::new(inner),
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Record a completed pairing attempt.
    pub fn log_pair_event(
        &self,
        disconnect_reason: i32,
        timestamp_ms: i64,
        device_class: i32,
        device_type: DeviceType,
    ) {
        self.lock().pair_log.push(PairEvent {
            disconnect_reason,
            event_time_ms: timestamp_ms,
            device: DeviceInfo::new(device_class, device_type),
        });
    }

    /// Record a radio wake-lock transition.
    pub fn log_wake_event(
        &self,
        event_type: WakeEventType,
        requestor: &str,
        name: &str,
        timestamp_ms: i64,
    ) {
        self.lock().wake_log.push(WakeEvent {
            event_type,
            requestor: requestor.to_string(),
            name: name.to_string(),
            event_time_ms: timestamp_ms,
        });
    }

    /// Record a scan start (`is_start`) or stop edge.
    pub fn log_scan_event(
        &self,
        is_start: bool,
        initiator: &str,
        technology: ScanTechnologyType,
        num_results: i32,
        timestamp_ms: i64,
    ) {
        let event_type = if is_start {
            ScanEventType::Start
        } else {
            ScanEventType::Stop
        };
        self.lock().scan_log.push(ScanEvent {
            event_type,
            initiator: initiator.to_string(),
            technology,
            num_results,
            event_time_ms: timestamp_ms,
        });
    }

    /// Open a link session, force-closing any session left open.
    pub fn log_session_start(&self, technology: ConnectionTechnologyType, timestamp_ms: i64) {
        self.lock().tracker.start(technology, timestamp_ms);
    }

    /// Attach device identity to the open session; ignored while idle.
    pub fn log_session_device_info(&self, device_class: i32, device_type: DeviceType) {
        self.lock()
            .tracker
            .set_device_info(DeviceInfo::new(device_class, device_type));
    }

    /// Fold a partial audio-stats report into the open session; ignored
    /// while idle.
    pub fn log_a2dp_session(&self, stats: &AudioSessionStats) {
        self.lock().tracker.log_audio_stats(stats);
    }

    /// Close the open session; ignored while idle.
    pub fn log_session_end(&self, reason: &str, timestamp_ms: i64) {
        self.lock().tracker.end(reason, timestamp_ms);
    }

    /// Build a consistent snapshot of the current state.
    ///
    /// With `drain`, completed sessions and all event logs are consumed
    /// atomically as part of producing the snapshot. The open session — its
    /// start time, device info and accumulated audio stats — is never
    /// cleared by a snapshot; it keeps accumulating and is re-reported by
    /// later dumps until it ends.
    pub fn write_snapshot(&self, drain: bool) -> LogSnapshot {
        let now_ms = self.clock.now_ms();
        let mut inner = self.lock();

        let mut sessions = if drain {
            inner.tracker.drain_completed()
        } else {
            inner.tracker.completed().to_vec()
        };
        if let Some(in_flight) = inner.tracker.peek_snapshot(now_ms) {
            sessions.push(in_flight);
        }

        let (pair_events, wake_events, scan_events) = if drain {
            (
                inner.pair_log.drain(),
                inner.wake_log.drain(),
                inner.scan_log.drain(),
            )
        } else {
            (
                inner.pair_log.snapshot(),
                inner.wake_log.snapshot(),
                inner.scan_log.snapshot(),
            )
        };

        LogSnapshot {
            sessions,
            pair_events,
            wake_events,
            scan_events,
        }
    }

    /// Return to the empty initial state: no open session, no completed
    /// sessions, empty event logs.
    pub fn reset(&self) {
        let mut inner = self.lock();
        *inner = Inner::new(&self.config);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}
