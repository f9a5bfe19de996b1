//! Linkmetrics Core - aggregation engine, session tracking, and event buffering
//!
//! In-process telemetry for a device connectivity stack. Call sites log
//! discrete events (pairing, radio wake, scanning) and streaming-audio
//! session statistics; the aggregator folds them into a compact running
//! state that an exporter can snapshot at any cadence without losing
//! in-flight session data.

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod events;
pub mod session;

pub use aggregator::{LogSnapshot, MetricsAggregator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AggregatorConfig, ConfigError, DEFAULT_EVENT_LOG_CAPACITY};
pub use events::log::BoundedEventLog;
pub use events::{
    PairEvent, ScanEvent, ScanEventType, ScanTechnologyType, WakeEvent, WakeEventType,
};
pub use session::stats::AudioSessionStats;
pub use session::tracker::SessionTracker;
pub use session::{
    ConnectionTechnologyType, DeviceInfo, DeviceType, SessionRecord,
    DISCONNECT_REASON_METRICS_DUMP, DISCONNECT_REASON_NEXT_SESSION_START,
};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
