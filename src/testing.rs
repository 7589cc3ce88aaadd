//! Synthetic hand poses for tests

use crate::landmarks::{
    FrameObservation, HandPose, Handedness, Landmark, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP,
    PINKY_TIP, RING_TIP, THUMB_MCP, THUMB_TIP,
};

const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Build landmarks with the given non-thumb fingers raised (index, middle,
/// ring, pinky) and the thumb either pushed out sideways or tucked in.
pub fn landmarks_with(extended: [bool; 4], thumb_out: bool, wrist: Landmark) -> Vec<Landmark> {
    let mut points = vec![wrist; LANDMARK_COUNT];

    for (tip, raised) in FINGER_TIPS.iter().zip(extended) {
        let base_y = wrist.y - 0.1;
        points[tip - 2] = Landmark::new(wrist.x, base_y);
        points[*tip] = if raised {
            Landmark::new(wrist.x, base_y - 0.1)
        } else {
            Landmark::new(wrist.x, base_y + 0.05)
        };
    }

    points[THUMB_MCP] = Landmark::new(wrist.x, wrist.y - 0.05);
    let thumb_dx = if thumb_out { 0.08 } else { 0.01 };
    points[THUMB_TIP] = Landmark::new(wrist.x + thumb_dx, wrist.y - 0.05);

    points
}

/// Landmarks that the classifier reads as `digit` (0 is a fist)
pub fn digit_landmarks(digit: u8, wrist: Landmark) -> Vec<Landmark> {
    match digit {
        1 => landmarks_with([true, false, false, false], false, wrist),
        2 => landmarks_with([true, true, false, false], false, wrist),
        3 => landmarks_with([true, true, true, false], false, wrist),
        4 => landmarks_with([true, true, true, true], false, wrist),
        5 => landmarks_with([true, true, true, true], true, wrist),
        _ => landmarks_with([false; 4], false, wrist),
    }
}

pub fn digit_pose(digit: u8) -> HandPose {
    let points = digit_landmarks(digit, Landmark::new(0.5, 0.8));
    HandPose::try_from(points.as_slice()).unwrap()
}

/// A two-hand frame; `left` and `right` are the user's hands, labelled the
/// way the mirrored source reports them.
pub fn two_hand_frame(
    left: u8,
    right: u8,
    left_wrist: Landmark,
    right_wrist: Landmark,
) -> FrameObservation {
    FrameObservation::empty()
        .with_hand(Handedness::Right, digit_landmarks(left, left_wrist))
        .with_hand(Handedness::Left, digit_landmarks(right, right_wrist))
}
