//! Linkmetrics - connectivity telemetry aggregation and export
//!
//! Composition root over [`linkmetrics_core`]: the process-wide aggregator
//! instance, the JSON snapshot codec, and the periodic exporter that hands
//! encoded snapshots to the analytics pipeline.

pub mod codec;
pub mod exporter;

use std::sync::Arc;

use once_cell::sync::Lazy;

pub use codec::{CodecError, JsonSnapshotCodec, SnapshotCodec};
pub use exporter::{Exporter, ExporterConfig};
pub use linkmetrics_core::{
    AggregatorConfig, AudioSessionStats, Clock, ConnectionTechnologyType, DeviceInfo, DeviceType,
    LogSnapshot, ManualClock, MetricsAggregator, PairEvent, ScanEvent, ScanEventType,
    ScanTechnologyType, SessionRecord, SystemClock, WakeEvent, WakeEventType,
};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static GLOBAL: Lazy<Arc<MetricsAggregator>> =
    Lazy::new(|| Arc::new(MetricsAggregator::new(AggregatorConfig::default())));

/// Process-wide aggregator shared by every call site in the stack.
///
/// The core type stays plain and constructor-injected; only this
/// composition root pins a singleton. Prefer passing the `Arc` explicitly
/// where a component already takes dependencies.
pub fn global() -> Arc<MetricsAggregator> {
    Arc::clone(&GLOBAL)
}
