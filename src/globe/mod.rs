//! Reference event sink: the globe's mode and animated scale

mod sink;
mod zoom;

pub use sink::{Globe, ModeSink, ZoomSink};
pub use zoom::{ZoomAnimator, MAX_SCALE, MIN_SCALE, SMOOTHING};
