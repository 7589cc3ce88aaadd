//! Hand landmark types delivered by the external landmark source
//!
//! Hands arrive as 21 normalized 2D keypoints with a camera-side label.

mod pose;

pub use pose::{
    remap_handedness, FrameObservation, HandPose, Handedness, Landmark, PoseError, Side,
    SourceHand, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
    PINKY_TIP, RING_PIP, RING_TIP, THUMB_MCP, THUMB_TIP, WRIST,
};
