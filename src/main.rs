//! Linkmetrics demo - simulated connectivity stack feeding the aggregator
//!
//! Spawns synthetic call sites (session churn, wake transitions, scans)
//! against an explicitly constructed aggregator and runs the periodic
//! exporter. Snapshots go to stdout, or to `EXPORT_DIR` when set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use linkmetrics::{
    AggregatorConfig, AudioSessionStats, Clock, ConnectionTechnologyType, DeviceType, Exporter,
    ExporterConfig, JsonSnapshotCodec, MetricsAggregator, ScanTechnologyType, SystemClock,
    WakeEventType,
};

/// Load aggregator capacities from `LINKMETRICS_CONFIG`, falling back to
/// defaults on any error.
fn load_config() -> AggregatorConfig {
    let Some(path) = std::env::var_os("LINKMETRICS_CONFIG") else {
        return AggregatorConfig::default();
    };
    let config = match std::fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<AggregatorConfig>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.to_string_lossy(), error = %e, "failed to parse config, using defaults");
                return AggregatorConfig::default();
            }
        },
        Err(e) => {
            warn!(path = %path.to_string_lossy(), error = %e, "failed to read config, using defaults");
            return AggregatorConfig::default();
        }
    };
    if let Err(e) = config.validate() {
        warn!(error = %e, "invalid config, using defaults");
        return AggregatorConfig::default();
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linkmetrics=info".parse().unwrap()),
        )
        .init();

    let interval_secs = std::env::var("EXPORT_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10u64);
    let output_dir = std::env::var("EXPORT_DIR").ok().map(Into::into);

    let aggregator = Arc::new(MetricsAggregator::new(load_config()));
    let exporter = Exporter::new(
        Arc::clone(&aggregator),
        Box::new(JsonSnapshotCodec::pretty()),
        ExporterConfig {
            interval_secs,
            drain: true,
            output_dir,
        },
    );
    let shutdown = exporter.shutdown_flag();

    ctrlc::set_handler({
        let shutdown = Arc::clone(&shutdown);
        move || {
            shutdown.store(true, Ordering::Relaxed);
        }
    })?;

    info!(
        version = linkmetrics::VERSION,
        interval_secs, "linkmetrics demo starting"
    );

    let driver = tokio::spawn(simulate_stack(Arc::clone(&aggregator), shutdown));
    exporter.run().await;
    driver.await?;

    info!("linkmetrics demo stopped");
    Ok(())
}

/// Synthetic radio/audio/pairing call sites exercising the logging API.
async fn simulate_stack(aggregator: Arc<MetricsAggregator>, shutdown: Arc<AtomicBool>) {
    let clock = SystemClock;
    let mut round: u64 = 0;

    while !shutdown.load(Ordering::Relaxed) {
        aggregator.log_session_start(ConnectionTechnologyType::Le, clock.now_ms());
        aggregator.log_session_device_info(0x0240, DeviceType::Le);

        aggregator.log_wake_event(WakeEventType::Acquired, "radio", "page_scan", clock.now_ms());
        aggregator.log_scan_event(true, "settings", ScanTechnologyType::Le, 0, clock.now_ms());

        tokio::time::sleep(Duration::from_millis(750)).await;

        aggregator.log_a2dp_session(&AudioSessionStats {
            audio_duration_ms: 700,
            media_timer_min_ms: 18,
            media_timer_max_ms: 24,
            media_timer_avg_ms: 20.0,
            total_scheduling_count: 35,
            ..Default::default()
        });

        aggregator.log_scan_event(
            false,
            "settings",
            ScanTechnologyType::Le,
            (round % 7) as i32,
            clock.now_ms(),
        );
        aggregator.log_wake_event(WakeEventType::Released, "radio", "page_scan", clock.now_ms());

        if round % 5 == 0 {
            aggregator.log_pair_event(0, clock.now_ms(), 0x0240, DeviceType::Le);
        }

        aggregator.log_session_end("SIM_DISCONNECT", clock.now_ms());
        round += 1;
    }
}
