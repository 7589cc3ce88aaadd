//! Stateless gesture geometry
//!
//! Provides the per-hand digit classifier, the wrist distance mapper, and
//! the globe modes a confirmed digit selects.

mod classifier;
mod distance;
mod mode;

pub use classifier::{classify, Classifier, DigitClass, DigitError};
pub use distance::{map_distance, DistanceRange};
pub use mode::{Mode, ModeError};
