//! Link-session records and device identity

pub mod stats;
pub mod tracker;

use serde::{Deserialize, Serialize};

use self::stats::AudioSessionStats;

/// Disconnect reason recorded when a snapshot observes a still-open session.
pub const DISCONNECT_REASON_METRICS_DUMP: &str = "METRICS_DUMP";

/// Disconnect reason recorded when a new session starts over an unended one.
pub const DISCONNECT_REASON_NEXT_SESSION_START: &str =
    "NEXT_SESSION_START_WITHOUT_ENDING_PREVIOUS";

/// Link technology carrying a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionTechnologyType {
    #[default]
    Unknown,
    Le,
    Bredr,
}

/// Kind of remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    #[default]
    Unknown,
    Bredr,
    Le,
    /// Dual-mode device speaking both technologies
    Dumo,
}

/// Class and kind of a remote device.
///
/// Copied by value into whichever session or event references it; records
/// never alias a shared device object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Raw class-of-device bitmask as reported by the controller
    pub device_class: i32,
    pub device_type: DeviceType,
}

impl DeviceInfo {
    pub fn new(device_class: i32, device_type: DeviceType) -> Self {
        Self {
            device_class,
            device_type,
        }
    }
}

/// One completed (or dump-observed) link session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub connection_technology: ConnectionTechnologyType,
    /// Caller-supplied start instant in milliseconds
    pub start_time_ms: i64,
    /// Whole seconds between start and close (or dump)
    pub duration_sec: i64,
    /// Free-form reason, or one of the sentinel values
    pub disconnect_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioSessionStats>,
}
