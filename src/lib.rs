//! globe-gesture: two-hand gesture interpretation for a particle globe
//!
//! Landmark frames from an external hand tracker are classified per hand,
//! combined into mode and zoom events, and fanned out to sinks:
//! - `landmarks`: keypoint types and the camera-mirroring rule
//! - `gesture`: digit classifier, wrist distance mapper, globe modes
//! - `interpreter`: stateful dual-hand interpreter and its command loop
//! - `globe`: reference mode/zoom sink with scale animation
//! - `ipc`: Unix socket frame intake, status and event subscription

pub mod config;
pub mod events;
pub mod gesture;
pub mod globe;
pub mod interpreter;
pub mod ipc;
pub mod landmarks;
pub mod lifecycle;

#[cfg(test)]
mod testing;
