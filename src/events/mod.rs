//! Events emitted by the gesture interpreter
//!
//! [`FrameOutput`] is the full per-frame result; [`GestureEvent`] is what
//! gets broadcast to sinks and subscribed IPC clients.

use serde::{Deserialize, Serialize};

use crate::gesture::{DigitClass, Mode};

/// Result of observing one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Confirmed bimanual mode selection, if any
    pub mode_event: Option<Mode>,
    /// Zoom input in [0,1]; only present when both hands were seen
    pub zoom_signal: Option<f32>,
    pub left_detected: bool,
    pub right_detected: bool,
    pub left_digit: DigitClass,
    pub right_digit: DigitClass,
}

/// Where a mode change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeOrigin {
    /// Both hands agreed on a digit
    Gesture,
    /// Set directly by a client
    Manual,
}

/// Events broadcast to sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// The globe should switch to `mode`
    ModeChanged { mode: Mode, origin: ModeOrigin },

    /// Raw zoom input; the sink smooths it
    Zoom { signal: f32 },

    /// Per-frame detection status for display
    FrameObserved(FrameOutput),
}

impl std::fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureEvent::ModeChanged { mode, origin } => {
                write!(f, "MODE_CHANGED {} ({:?})", mode, origin)
            }
            GestureEvent::Zoom { signal } => write!(f, "ZOOM {:.2}", signal),
            GestureEvent::FrameObserved(output) => write!(
                f,
                "FRAME left={}:{} right={}:{}",
                output.left_detected, output.left_digit, output.right_detected, output.right_digit
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = GestureEvent::ModeChanged {
            mode: Mode::Topology,
            origin: ModeOrigin::Gesture,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("mode_changed"));
        assert!(json.contains(r#""mode":2"#));
        assert!(json.contains("gesture"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"zoom","signal":0.25}"#;
        let event: GestureEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, GestureEvent::Zoom { signal: 0.25 });
    }

    #[test]
    fn test_frame_event_roundtrip() {
        let output = FrameOutput {
            mode_event: Some(Mode::Water),
            zoom_signal: Some(0.5),
            left_detected: true,
            right_detected: true,
            left_digit: DigitClass::Three,
            right_digit: DigitClass::Three,
        };
        let json = serde_json::to_string(&GestureEvent::FrameObserved(output)).unwrap();
        assert!(json.contains("frame_observed"));
        let back: GestureEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GestureEvent::FrameObserved(output));
    }

    #[test]
    fn test_display() {
        let event = GestureEvent::Zoom { signal: 0.123 };
        assert_eq!(event.to_string(), "ZOOM 0.12");
    }
}
