//! Smoothed globe scale driven by raw zoom signals

/// Scale with hands together
pub const MIN_SCALE: f32 = 0.6;
/// Scale with hands far apart
pub const MAX_SCALE: f32 = 2.8;
/// Fraction of the remaining distance covered per render tick
pub const SMOOTHING: f32 = 0.1;

/// Exponential interpolation of the current scale toward the latest target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomAnimator {
    min_scale: f32,
    max_scale: f32,
    smoothing: f32,
    target: f32,
    current: f32,
}

impl Default for ZoomAnimator {
    fn default() -> Self {
        Self::new(MIN_SCALE, MAX_SCALE, SMOOTHING)
    }
}

impl ZoomAnimator {
    pub fn new(min_scale: f32, max_scale: f32, smoothing: f32) -> Self {
        Self {
            min_scale,
            max_scale,
            smoothing: smoothing.clamp(0.0, 1.0),
            target: 1.0,
            current: 1.0,
        }
    }

    /// Retarget from a zoom signal in [0,1]. Non-finite signals are ignored.
    pub fn set_signal(&mut self, signal: f32) {
        if !signal.is_finite() {
            return;
        }
        let signal = signal.clamp(0.0, 1.0);
        self.target = self.min_scale + signal * (self.max_scale - self.min_scale);
    }

    /// Advance one render tick
    pub fn step(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.smoothing;
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.current * 100.0).round().max(0.0) as u32
    }
}
