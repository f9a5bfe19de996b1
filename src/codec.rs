//! Snapshot encoding for the export pipeline
//!
//! The aggregator's responsibility ends at handing over a fully populated
//! [`LogSnapshot`]; framing and transport belong to the analytics pipeline.
//! The JSON codec here is the default wire shape: enum values as
//! SCREAMING_SNAKE_CASE strings, absent optionals omitted.

use linkmetrics_core::LogSnapshot;
use thiserror::Error;

/// Errors produced while encoding or decoding a snapshot.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serializes a [`LogSnapshot`] into export bytes.
pub trait SnapshotCodec: Send + Sync {
    fn encode(&self, snapshot: &LogSnapshot) -> Result<Vec<u8>, CodecError>;
}

/// JSON wire encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotCodec {
    /// Pretty-print for human consumption; compact otherwise
    pub pretty: bool,
}

impl JsonSnapshotCodec {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Parse bytes produced by [`SnapshotCodec::encode`]; used by tests and
    /// local tooling, the analytics pipeline has its own readers.
    pub fn decode(&self, bytes: &[u8]) -> Result<LogSnapshot, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::Decode)
    }
}

impl SnapshotCodec for JsonSnapshotCodec {
    fn encode(&self, snapshot: &LogSnapshot) -> Result<Vec<u8>, CodecError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(snapshot)
        } else {
            serde_json::to_vec(snapshot)
        };
        result.map_err(CodecError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use linkmetrics_core::{
        ConnectionTechnologyType, DeviceInfo, DeviceType, SessionRecord, WakeEvent, WakeEventType,
    };

    use super::*;

    fn sample_snapshot() -> LogSnapshot {
        LogSnapshot {
            sessions: vec![SessionRecord {
                connection_technology: ConnectionTechnologyType::Le,
                start_time_ms: 123_456,
                duration_sec: 10,
                disconnect_reason: "TEST_DISCONNECT".to_string(),
                device: Some(DeviceInfo::new(0x04, DeviceType::Bredr)),
                audio: None,
            }],
            wake_events: vec![WakeEvent {
                event_type: WakeEventType::Acquired,
                requestor: "radio".to_string(),
                name: "page_scan".to_string(),
                event_time_ms: 12_345,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let codec = JsonSnapshotCodec::default();
        let snapshot = sample_snapshot();
        let bytes = codec.encode(&snapshot).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_enum_wire_names_are_screaming_snake_case() {
        let codec = JsonSnapshotCodec::default();
        let bytes = codec.encode(&sample_snapshot()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"LE\""));
        assert!(text.contains("\"BREDR\""));
        assert!(text.contains("\"ACQUIRED\""));
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let codec = JsonSnapshotCodec::default();
        let bytes = codec.encode(&sample_snapshot()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("\"audio\""), "unset audio stats must not appear on the wire");
    }
}
