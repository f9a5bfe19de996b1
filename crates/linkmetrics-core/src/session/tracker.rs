//! Session lifecycle state machine
//!
//! At most one session accumulates at a time. Everything else lives in the
//! completed list, immutable once appended. Callers across the stack do not
//! coordinate their start/end ordering, so open-only operations arriving
//! while idle are absorbed as no-ops rather than treated as faults.

use tracing::debug;

use super::stats::AudioSessionStats;
use super::{
    ConnectionTechnologyType, DeviceInfo, SessionRecord, DISCONNECT_REASON_METRICS_DUMP,
    DISCONNECT_REASON_NEXT_SESSION_START,
};

/// The session currently accumulating.
#[derive(Debug, Clone)]
struct OpenSession {
    technology: ConnectionTechnologyType,
    start_time_ms: i64,
    device: Option<DeviceInfo>,
    audio: Option<AudioSessionStats>,
}

impl OpenSession {
    /// Materialize a record for this session, closed or observed at `end_ms`.
    fn to_record(&self, reason: &str, end_ms: i64) -> SessionRecord {
        SessionRecord {
            connection_technology: self.technology,
            start_time_ms: self.start_time_ms,
            duration_sec: (end_ms - self.start_time_ms).max(0) / 1000,
            disconnect_reason: reason.to_string(),
            device: self.device,
            audio: self.audio,
        }
    }
}

/// Tracks the lifecycle of the current link session.
#[derive(Debug, Default)]
pub struct SessionTracker {
    open: Option<OpenSession>,
    completed: Vec<SessionRecord>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session, force-closing any session left open.
    pub fn start(&mut self, technology: ConnectionTechnologyType, timestamp_ms: i64) {
        if let Some(open) = self.open.take() {
            debug!(
                ?technology,
                "session started over an unended one, force-closing previous"
            );
            self.completed
                .push(open.to_record(DISCONNECT_REASON_NEXT_SESSION_START, timestamp_ms));
        }
        self.open = Some(OpenSession {
            technology,
            start_time_ms: timestamp_ms,
            device: None,
            audio: None,
        });
    }

    /// Attach or overwrite the open session's device identity. Last write wins.
    pub fn set_device_info(&mut self, device: DeviceInfo) {
        match self.open.as_mut() {
            Some(open) => open.device = Some(device),
            None => debug!("device info with no open session, ignoring"),
        }
    }

    /// Fold a partial audio-stats report into the open session.
    pub fn log_audio_stats(&mut self, stats: &AudioSessionStats) {
        match self.open.as_mut() {
            Some(open) => {
                let current = open.audio.unwrap_or_default();
                open.audio = Some(current.merge(stats));
            }
            None => debug!("audio stats with no open session, ignoring"),
        }
    }

    /// Close the open session and append it to the completed list.
    pub fn end(&mut self, reason: &str, timestamp_ms: i64) {
        match self.open.take() {
            Some(open) => self.completed.push(open.to_record(reason, timestamp_ms)),
            None => debug!(reason, "session end with no open session, ignoring"),
        }
    }

    /// Synthetic record for the open session, if any, without closing it or
    /// touching its accumulated state.
    pub fn peek_snapshot(&self, now_ms: i64) -> Option<SessionRecord> {
        self.open
            .as_ref()
            .map(|open| open.to_record(DISCONNECT_REASON_METRICS_DUMP, now_ms))
    }

    /// Completed sessions in completion order.
    pub fn completed(&self) -> &[SessionRecord] {
        &self.completed
    }

    /// Take the completed list, leaving the open session untouched.
    pub fn drain_completed(&mut self) -> Vec<SessionRecord> {
        std::mem::take(&mut self.completed)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Drop everything, open session included.
    pub fn reset(&mut self) {
        self.open = None;
        self.completed.clear();
    }
}
