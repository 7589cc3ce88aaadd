//! IPC message protocol definitions
//!
//! All messages are JSON-encoded, prefixed with a 4-byte little-endian length.

use serde::{Deserialize, Serialize};

use crate::events::{FrameOutput, GestureEvent};
use crate::gesture::{DigitClass, Mode};
use crate::landmarks::FrameObservation;

/// Requests from the landmark source or UI to the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Request current daemon status
    GetStatus,

    /// Interpret one camera frame
    Observe { frame: FrameObservation },

    /// Switch the globe mode directly
    SetMode { mode: Mode },

    /// Set the zoom input directly, in [0,1]
    SetZoom { signal: f32 },

    /// Ping to check connectivity
    Ping,

    /// Turn this connection into a stream of gesture events
    Subscribe,
}

/// Responses from daemon to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Current daemon status
    Status(DaemonStatus),

    /// Interpreter output for an observed frame
    Frame(FrameOutput),

    /// Manual mode change accepted
    ModeChange { mode: Mode },

    /// Manual zoom accepted
    ZoomChange { signal: f32 },

    /// Pong response to ping
    Pong,

    /// Subscription confirmed
    Subscribed,

    /// Error response
    Error { code: String, message: String },
}

impl Response {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Response::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Push notification from daemon to subscribed clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A gesture event occurred
    Event { event: GestureEvent },
}

/// Full daemon status snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// Daemon version
    pub version: String,

    /// Current globe mode
    pub mode: Mode,

    /// Animated globe scale as a percentage
    pub zoom_percent: u32,

    pub left_detected: bool,
    pub right_detected: bool,
    pub left_digit: DigitClass,
    pub right_digit: DigitClass,

    /// Frames interpreted since startup
    pub frames_observed: u64,

    /// Uptime in seconds
    pub uptime_secs: u64,
}

impl Default for DaemonStatus {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode: Mode::default(),
            zoom_percent: 100,
            left_detected: false,
            right_detected: false,
            left_digit: DigitClass::None,
            right_digit: DigitClass::None,
            frames_observed: 0,
            uptime_secs: 0,
        }
    }
}

impl DaemonStatus {
    /// Fold a broadcast event into the snapshot
    pub fn record(&mut self, event: &GestureEvent) {
        match event {
            GestureEvent::ModeChanged { mode, .. } => self.mode = *mode,
            GestureEvent::Zoom { .. } => {}
            GestureEvent::FrameObserved(output) => {
                self.left_detected = output.left_detected;
                self.right_detected = output.right_detected;
                self.left_digit = output.left_digit;
                self.right_digit = output.right_digit;
                self.frames_observed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ModeOrigin;

    #[test]
    fn test_request_serialization() {
        let req = Request::SetMode { mode: Mode::Topology };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("set_mode"));
        assert!(json.contains(r#""mode":2"#));
    }

    #[test]
    fn test_observe_request_deserialization() {
        let json = r#"{"type":"observe","frame":{"hands":[{"handedness":"Left","landmarks":[]}]}}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        match req {
            Request::Observe { frame } => assert_eq!(frame.hands.len(), 1),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_response_serialization() {
        let resp = Response::Status(DaemonStatus::default());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("status"));
        assert!(json.contains("zoom_percent"));
    }

    #[test]
    fn test_status_records_events() {
        let mut status = DaemonStatus::default();
        status.record(&GestureEvent::ModeChanged {
            mode: Mode::Water,
            origin: ModeOrigin::Gesture,
        });
        status.record(&GestureEvent::FrameObserved(FrameOutput {
            left_detected: true,
            left_digit: DigitClass::Two,
            ..FrameOutput::default()
        }));

        assert_eq!(status.mode, Mode::Water);
        assert!(status.left_detected);
        assert!(!status.right_detected);
        assert_eq!(status.left_digit, DigitClass::Two);
        assert_eq!(status.frames_observed, 1);
    }
}
