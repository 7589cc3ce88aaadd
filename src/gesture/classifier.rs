//! Finger-count classification for a single hand
//!
//! Each frame is classified independently. The rules are strict: sloppy or
//! partial poses come out as [`DigitClass::None`] instead of a best guess.

use serde::{Deserialize, Serialize};

use crate::landmarks::{
    HandPose, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_MCP, THUMB_TIP,
};

/// (tip, base) of index, middle, ring and pinky
const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Recognized finger-count gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DigitClass {
    /// Fist, ambiguous or unrecognized pose
    #[default]
    None,
    One,
    Two,
    Three,
    Four,
    /// Four fingers and the thumb out
    OpenHand,
}

impl DigitClass {
    pub fn value(self) -> u8 {
        match self {
            DigitClass::None => 0,
            DigitClass::One => 1,
            DigitClass::Two => 2,
            DigitClass::Three => 3,
            DigitClass::Four => 4,
            DigitClass::OpenHand => 5,
        }
    }
}

impl From<DigitClass> for u8 {
    fn from(digit: DigitClass) -> Self {
        digit.value()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("digit class must be between 0 and 5, got {0}")]
pub struct DigitError(pub u8);

impl TryFrom<u8> for DigitClass {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DigitClass::None),
            1 => Ok(DigitClass::One),
            2 => Ok(DigitClass::Two),
            3 => Ok(DigitClass::Three),
            4 => Ok(DigitClass::Four),
            5 => Ok(DigitClass::OpenHand),
            other => Err(DigitError(other)),
        }
    }
}

impl std::fmt::Display for DigitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigitClass::None => write!(f, "-"),
            DigitClass::OpenHand => write!(f, "open"),
            digit => write!(f, "{}", digit.value()),
        }
    }
}

/// Geometric thresholds in normalized image units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    /// Minimum horizontal gap between thumb tip and thumb base
    pub thumb_threshold: f32,
    /// How far a fingertip must sit above its base joint
    pub finger_margin: f32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            thumb_threshold: 0.04,
            finger_margin: 0.02,
        }
    }
}

impl Classifier {
    pub fn classify(&self, hand: &HandPose) -> DigitClass {
        let thumb = self.thumb_extended(hand);
        let fingers = FINGERS.map(|(tip, base)| self.finger_extended(hand, tip, base));
        let count = fingers.iter().filter(|&&up| up).count();

        match (count, fingers, thumb) {
            (1, [true, false, false, false], _) => DigitClass::One,
            (2, [true, true, false, false], _) => DigitClass::Two,
            (3, [true, true, true, false], _) => DigitClass::Three,
            (4, _, false) => DigitClass::Four,
            (4, _, true) => DigitClass::OpenHand,
            _ => DigitClass::None,
        }
    }

    /// Magnitude only: the direction the thumb points is not considered.
    fn thumb_extended(&self, hand: &HandPose) -> bool {
        let tip = hand.landmark(THUMB_TIP);
        let base = hand.landmark(THUMB_MCP);
        (tip.x - base.x).abs() > self.thumb_threshold
    }

    fn finger_extended(&self, hand: &HandPose, tip: usize, base: usize) -> bool {
        hand.landmark(tip).y < hand.landmark(base).y - self.finger_margin
    }
}

/// Classify with the default thresholds
pub fn classify(hand: &HandPose) -> DigitClass {
    Classifier::default().classify(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, LANDMARK_COUNT};
    use crate::testing::{digit_pose, landmarks_with};

    fn pose(extended: [bool; 4], thumb_out: bool) -> HandPose {
        let points = landmarks_with(extended, thumb_out, Landmark::new(0.5, 0.8));
        HandPose::try_from(points.as_slice()).unwrap()
    }

    #[test]
    fn test_recognized_digits() {
        assert_eq!(classify(&digit_pose(0)), DigitClass::None);
        assert_eq!(classify(&digit_pose(1)), DigitClass::One);
        assert_eq!(classify(&digit_pose(2)), DigitClass::Two);
        assert_eq!(classify(&digit_pose(3)), DigitClass::Three);
        assert_eq!(classify(&digit_pose(4)), DigitClass::Four);
        assert_eq!(classify(&digit_pose(5)), DigitClass::OpenHand);
    }

    #[test]
    fn test_thumb_ignored_below_four_fingers() {
        assert_eq!(classify(&pose([true, false, false, false], true)), DigitClass::One);
        assert_eq!(classify(&pose([true, true, false, false], true)), DigitClass::Two);
        assert_eq!(classify(&pose([true, true, true, false], true)), DigitClass::Three);
    }

    #[test]
    fn test_every_other_combination_is_none() {
        let recognized = [
            [true, false, false, false],
            [true, true, false, false],
            [true, true, true, false],
            [true, true, true, true],
        ];

        for mask in 0u8..16 {
            let extended = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0];
            if recognized.contains(&extended) {
                continue;
            }
            for thumb in [false, true] {
                assert_eq!(
                    classify(&pose(extended, thumb)),
                    DigitClass::None,
                    "fingers {:?} thumb {}",
                    extended,
                    thumb
                );
            }
        }
    }

    #[test]
    fn test_finger_margin_is_strict() {
        let wrist = Landmark::new(0.5, 0.8);
        let mut points = landmarks_with([true, false, false, false], false, wrist);
        // Tip only 0.01 above its base: not extended.
        points[INDEX_TIP] = Landmark::new(0.5, points[INDEX_PIP].y - 0.01);
        let hand = HandPose::try_from(points.as_slice()).unwrap();
        assert_eq!(classify(&hand), DigitClass::None);
    }

    #[test]
    fn test_thumb_uses_magnitude_only() {
        // Known limitation: a thumb pushed out to either side reads the same.
        let mut points = landmarks_with([true; 4], false, Landmark::new(0.5, 0.8));
        points[THUMB_TIP].x = points[THUMB_MCP].x - 0.08;
        let mirrored = HandPose::try_from(points.as_slice()).unwrap();
        assert_eq!(classify(&mirrored), DigitClass::OpenHand);
        assert_eq!(classify(&pose([true; 4], true)), DigitClass::OpenHand);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let hand = digit_pose(3);
        let first = classify(&hand);
        for _ in 0..10 {
            assert_eq!(classify(&hand), first);
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let loose = Classifier {
            thumb_threshold: 0.1,
            finger_margin: 0.02,
        };
        // A thumb 0.08 out is no longer extended with a 0.1 threshold.
        assert_eq!(loose.classify(&digit_pose(5)), DigitClass::Four);
    }

    #[test]
    fn test_flat_hand_is_none() {
        let flat = HandPose::new([Landmark::new(0.5, 0.5); LANDMARK_COUNT]);
        assert_eq!(classify(&flat), DigitClass::None);
    }

    #[test]
    fn test_digit_serializes_as_number() {
        assert_eq!(serde_json::to_string(&DigitClass::Three).unwrap(), "3");
        let digit: DigitClass = serde_json::from_str("5").unwrap();
        assert_eq!(digit, DigitClass::OpenHand);
        assert!(serde_json::from_str::<DigitClass>("6").is_err());
    }
}
