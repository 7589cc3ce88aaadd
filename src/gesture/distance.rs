//! Inter-hand distance to zoom input

use crate::landmarks::Landmark;

/// Raw wrist-to-wrist span that maps onto [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub min: f32,
    pub max: f32,
}

impl Default for DistanceRange {
    fn default() -> Self {
        // Hands rarely stay trackable past ~0.6 of the frame apart.
        Self { min: 0.05, max: 0.6 }
    }
}

impl DistanceRange {
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    /// Rescale a raw distance into [0,1], clamping outside the range.
    pub fn normalize(&self, raw: f32) -> f32 {
        ((raw - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    pub fn map(&self, wrist_a: Landmark, wrist_b: Landmark) -> f32 {
        self.normalize(wrist_a.distance(&wrist_b))
    }
}

/// Map two wrist points to a zoom input with the default range
pub fn map_distance(wrist_a: Landmark, wrist_b: Landmark) -> f32 {
    DistanceRange::default().map(wrist_a, wrist_b)
}
