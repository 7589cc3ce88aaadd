//! Landmark geometry and per-frame hand observations
//!
//! The landmark source reports hands with a camera-side label. Everything
//! downstream of the interpreter boundary works with [`Side`], the user's
//! physical hand, obtained through [`remap_handedness`].

use serde::{Deserialize, Serialize};

/// Number of keypoints in one hand
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// A keypoint normalized to [0,1] relative to the camera frame.
///
/// Smaller `y` is higher on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in normalized image units
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Hand label as reported by the landmark source (camera-mirrored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// The user's physical hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Map a source label to the user's hand.
///
/// The camera view is mirrored: a hand the source calls "Right" is the
/// user's left hand, and vice versa.
pub fn remap_handedness(label: Handedness) -> Side {
    match label {
        Handedness::Right => Side::Left,
        Handedness::Left => Side::Right,
    }
}

/// One hand exactly as the source delivered it, possibly malformed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceHand {
    #[serde(default)]
    pub handedness: Option<Handedness>,
    pub landmarks: Vec<Landmark>,
}

/// Everything the source saw in one camera frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameObservation {
    #[serde(default)]
    pub hands: Vec<SourceHand>,
}

impl FrameObservation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hand(mut self, handedness: Handedness, landmarks: Vec<Landmark>) -> Self {
        self.hands.push(SourceHand {
            handedness: Some(handedness),
            landmarks,
        });
        self
    }
}

/// Reasons a source hand cannot be used this frame
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoseError {
    #[error("expected 21 landmarks, got {0}")]
    LandmarkCount(usize),

    #[error("hand has no handedness label")]
    MissingHandedness,

    #[error("landmark {0} has a non-finite coordinate")]
    NonFinite(usize),
}

/// A validated set of 21 landmarks in anatomical order
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn landmark(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    pub fn wrist(&self) -> Landmark {
        self.landmarks[WRIST]
    }
}

impl TryFrom<&[Landmark]> for HandPose {
    type Error = PoseError;

    fn try_from(points: &[Landmark]) -> Result<Self, Self::Error> {
        let landmarks: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| PoseError::LandmarkCount(points.len()))?;
        if let Some(index) = landmarks.iter().position(|point| !point.is_finite()) {
            return Err(PoseError::NonFinite(index));
        }
        Ok(Self { landmarks })
    }
}
