//! Dual-hand interpreter
//!
//! Turns one frame of source hands into detection flags, per-hand digits,
//! a confirmed mode (when both hands agree) and a zoom signal (whenever both
//! hands are present).

use std::str::FromStr;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::events::{FrameOutput, GestureEvent, ModeOrigin};
use crate::gesture::{Classifier, DigitClass, DistanceRange, Mode};
use crate::landmarks::{
    remap_handedness, FrameObservation, HandPose, PoseError, Side, SourceHand,
};

/// Whether a mode held across frames is re-announced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeRepeat {
    /// Emit a mode event on every agreeing frame
    #[default]
    EveryFrame,
    /// Emit only when the confirmed mode differs from the last one
    OnChange,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode repeat policy {0:?} (expected every_frame or on_change)")]
pub struct ModeRepeatError(pub String);

impl FromStr for ModeRepeat {
    type Err = ModeRepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every_frame" => Ok(ModeRepeat::EveryFrame),
            "on_change" => Ok(ModeRepeat::OnChange),
            _ => Err(ModeRepeatError(s.to_string())),
        }
    }
}

/// Tunables for one interpreter instance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InterpreterConfig {
    pub classifier: Classifier,
    pub distance: DistanceRange,
    pub mode_repeat: ModeRepeat,
}

/// State carried between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpreterState {
    /// Last mode emitted or set manually
    pub last_mode: Option<Mode>,
}

/// Requests handled by [`Interpreter::run`]
#[derive(Debug)]
pub enum Command {
    /// Interpret one frame, optionally replying with the output
    Observe {
        frame: FrameObservation,
        reply: Option<oneshot::Sender<FrameOutput>>,
    },
    /// Switch mode without a gesture
    SetMode(Mode),
    /// Override the zoom input without a gesture
    SetZoom(f32),
}

/// The user's hands admitted from one frame
#[derive(Debug, Default)]
struct Hands {
    left: Option<HandPose>,
    right: Option<HandPose>,
}

/// Stateful interpreter for a single landmark stream
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
    state: InterpreterState,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config,
            state: InterpreterState::default(),
        }
    }

    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// Interpret one frame
    pub fn observe(&mut self, frame: &FrameObservation) -> FrameOutput {
        let hands = admit_hands(frame);

        let left_digit = self.digit_of(hands.left.as_ref());
        let right_digit = self.digit_of(hands.right.as_ref());

        let (mode_event, zoom_signal) = match (&hands.left, &hands.right) {
            (Some(left), Some(right)) => (
                self.confirm_mode(left_digit, right_digit),
                Some(self.config.distance.map(left.wrist(), right.wrist())),
            ),
            _ => (None, None),
        };

        FrameOutput {
            mode_event,
            zoom_signal,
            left_detected: hands.left.is_some(),
            right_detected: hands.right.is_some(),
            left_digit,
            right_digit,
        }
    }

    /// Record a mode chosen outside of gestures
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.last_mode = Some(mode);
    }

    /// Process commands until the channel closes
    pub async fn run(
        &mut self,
        mut command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GestureEvent>,
    ) {
        info!(repeat = ?self.config.mode_repeat, "interpreter started");

        while let Some(command) = command_rx.recv().await {
            match command {
                Command::Observe { frame, reply } => {
                    let output = self.observe(&frame);
                    publish(&event_tx, &output);
                    if let Some(reply) = reply {
                        let _ = reply.send(output);
                    }
                }
                Command::SetMode(mode) => {
                    info!(%mode, "manual mode change");
                    self.set_mode(mode);
                    let _ = event_tx.send(GestureEvent::ModeChanged {
                        mode,
                        origin: ModeOrigin::Manual,
                    });
                }
                Command::SetZoom(signal) => {
                    debug!(signal, "manual zoom");
                    let _ = event_tx.send(GestureEvent::Zoom { signal });
                }
            }
        }

        info!("interpreter stopped");
    }

    fn digit_of(&self, hand: Option<&HandPose>) -> DigitClass {
        hand.map(|pose| self.config.classifier.classify(pose))
            .unwrap_or_default()
    }

    /// Both hands must show the same digit, and it must select a mode.
    fn confirm_mode(&mut self, left: DigitClass, right: DigitClass) -> Option<Mode> {
        if left != right {
            return None;
        }
        let mode = Mode::from_digit(left)?;

        if self.config.mode_repeat == ModeRepeat::OnChange && self.state.last_mode == Some(mode) {
            return None;
        }

        self.state.last_mode = Some(mode);
        Some(mode)
    }
}

/// Validate source hands and place them by the user's side.
///
/// Malformed hands are dropped for this frame. If two hands land on the same
/// side, the later one wins.
fn admit_hands(frame: &FrameObservation) -> Hands {
    let mut hands = Hands::default();

    for hand in &frame.hands {
        match admit(hand) {
            Ok((Side::Left, pose)) => hands.left = Some(pose),
            Ok((Side::Right, pose)) => hands.right = Some(pose),
            Err(e) => debug!(%e, "dropping hand"),
        }
    }

    hands
}

fn admit(hand: &SourceHand) -> Result<(Side, HandPose), PoseError> {
    let label = hand.handedness.ok_or(PoseError::MissingHandedness)?;
    let pose = HandPose::try_from(hand.landmarks.as_slice())?;
    Ok((remap_handedness(label), pose))
}

fn publish(event_tx: &broadcast::Sender<GestureEvent>, output: &FrameOutput) {
    if let Some(mode) = output.mode_event {
        debug!(%mode, "mode confirmed by both hands");
        let _ = event_tx.send(GestureEvent::ModeChanged {
            mode,
            origin: ModeOrigin::Gesture,
        });
    }
    if let Some(signal) = output.zoom_signal {
        let _ = event_tx.send(GestureEvent::Zoom { signal });
    }
    debug!(?output, "frame observed");
    let _ = event_tx.send(GestureEvent::FrameObserved(*output));
}
