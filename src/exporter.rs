//! Periodic snapshot exporter
//!
//! Polls the aggregator on a fixed cadence, encodes each snapshot, and
//! writes it to the configured sink. Sink and codec failures are logged and
//! the tick is skipped; the aggregator is never blocked on downstream I/O.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use linkmetrics_core::MetricsAggregator;

use crate::codec::SnapshotCodec;

fn default_interval_secs() -> u64 {
    300
}

fn default_drain() -> bool {
    true
}

/// Exporter cadence and sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Seconds between snapshots
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Consume completed history with each snapshot
    #[serde(default = "default_drain")]
    pub drain: bool,
    /// Directory for timestamped snapshot files; None writes to stdout
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            drain: default_drain(),
            output_dir: None,
        }
    }
}

/// Periodic exporter over a shared aggregator.
pub struct Exporter {
    aggregator: Arc<MetricsAggregator>,
    codec: Box<dyn SnapshotCodec>,
    config: ExporterConfig,
    shutdown: Arc<AtomicBool>,
}

impl Exporter {
    pub fn new(
        aggregator: Arc<MetricsAggregator>,
        codec: Box<dyn SnapshotCodec>,
        config: ExporterConfig,
    ) -> Self {
        Self {
            aggregator,
            codec,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked between ticks; set it to stop [`Exporter::run`].
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Snapshot, encode, and write once. Returns the encoded byte count,
    /// zero when there was nothing to report.
    pub fn export_once(&self) -> Result<usize> {
        let snapshot = self.aggregator.write_snapshot(self.config.drain);
        if snapshot.is_empty() {
            debug!("snapshot empty, skipping write");
            return Ok(0);
        }

        let bytes = self.codec.encode(&snapshot).context("encoding snapshot")?;
        self.write_sink(&bytes).context("writing snapshot")?;
        info!(
            sessions = snapshot.sessions.len(),
            pair_events = snapshot.pair_events.len(),
            wake_events = snapshot.wake_events.len(),
            scan_events = snapshot.scan_events.len(),
            bytes = bytes.len(),
            "exported snapshot"
        );
        Ok(bytes.len())
    }

    fn write_sink(&self, bytes: &[u8]) -> Result<()> {
        match &self.config.output_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let name = format!(
                    "snapshot-{}.json",
                    chrono::Utc::now().format("%Y%m%dT%H%M%S%3f")
                );
                std::fs::write(dir.join(name), bytes)?;
            }
            None => {
                let mut out = std::io::stdout().lock();
                out.write_all(bytes)?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    /// Export every interval until the shutdown flag is set.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so a fresh process does
        // not export an empty snapshot at startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if self.shutdown.load(Ordering::Relaxed) {
                info!("exporter shutting down");
                break;
            }
            if let Err(e) = self.export_once() {
                warn!(error = %e, "snapshot export failed, will retry next tick");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use linkmetrics_core::{AggregatorConfig, ConnectionTechnologyType};

    use super::*;
    use crate::codec::JsonSnapshotCodec;

    #[test]
    fn test_export_once_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let aggregator = Arc::new(MetricsAggregator::new(AggregatorConfig::default()));
        aggregator.log_session_start(ConnectionTechnologyType::Le, 0);
        aggregator.log_session_end("TEST_DISCONNECT", 10_000);

        let exporter = Exporter::new(
            Arc::clone(&aggregator),
            Box::new(JsonSnapshotCodec::default()),
            ExporterConfig {
                interval_secs: 1,
                drain: true,
                output_dir: Some(dir.path().to_path_buf()),
            },
        );

        let written = exporter.export_once().unwrap();
        assert!(written > 0);

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);

        // History was drained into the file; nothing left to export.
        assert_eq!(exporter.export_once().unwrap(), 0);
    }

    #[test]
    fn test_empty_snapshot_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let aggregator = Arc::new(MetricsAggregator::new(AggregatorConfig::default()));
        let exporter = Exporter::new(
            aggregator,
            Box::new(JsonSnapshotCodec::default()),
            ExporterConfig {
                output_dir: Some(dir.path().to_path_buf()),
                ..Default::default()
            },
        );

        assert_eq!(exporter.export_once().unwrap(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
