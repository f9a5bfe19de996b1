//! Discrete connectivity events
//!
//! Point-in-time occurrences logged independently of any session: pairing
//! completions, radio wake transitions, and device scans. Timestamps are
//! caller-supplied milliseconds; monotonic sources are recommended but not
//! required.

pub mod log;

use serde::{Deserialize, Serialize};

use crate::session::DeviceInfo;

/// Direction of a radio wake transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WakeEventType {
    /// Wake lock taken on behalf of the radio
    Acquired,
    /// Wake lock released
    Released,
}

/// Start or stop edge of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanEventType {
    Start,
    Stop,
}

/// Radio technology a scan ran over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanTechnologyType {
    #[default]
    Unknown,
    Bredr,
    Le,
    Both,
}

/// A completed pairing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEvent {
    /// Stack-level reason code for the disconnect that ended pairing
    pub disconnect_reason: i32,
    /// When the attempt finished, caller-supplied milliseconds
    pub event_time_ms: i64,
    /// The remote device involved
    pub device: DeviceInfo,
}

/// A radio wake-lock transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeEvent {
    pub event_type: WakeEventType,
    /// Subsystem that requested the wake lock
    pub requestor: String,
    /// Name the requestor gave the lock
    pub name: String,
    pub event_time_ms: i64,
}

/// A device-scan start or stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub event_type: ScanEventType,
    /// Subsystem that initiated the scan
    pub initiator: String,
    pub technology: ScanTechnologyType,
    /// Devices found; meaningful on the stop edge
    pub num_results: i32,
    pub event_time_ms: i64,
}
