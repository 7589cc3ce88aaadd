//! Event sinks for mode and zoom output

use tracing::{debug, info};

use crate::events::GestureEvent;
use crate::gesture::Mode;

use super::zoom::ZoomAnimator;

/// Consumes confirmed mode selections
pub trait ModeSink {
    fn set_mode(&mut self, mode: Mode);
}

/// Consumes raw zoom signals; smoothing is the sink's job
pub trait ZoomSink {
    fn set_zoom(&mut self, signal: f32);
}

/// The globe's visual state as driven by gestures
#[derive(Debug, Clone, Default)]
pub struct Globe {
    mode: Mode,
    zoom: ZoomAnimator,
    mode_switches: u64,
}

impl Globe {
    pub fn new(zoom: ZoomAnimator) -> Self {
        Self {
            mode: Mode::default(),
            zoom,
            mode_switches: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn zoom(&self) -> &ZoomAnimator {
        &self.zoom
    }

    pub fn mode_switches(&self) -> u64 {
        self.mode_switches
    }

    /// Route a broadcast event to the matching sink
    pub fn apply(&mut self, event: &GestureEvent) {
        match event {
            GestureEvent::ModeChanged { mode, .. } => self.set_mode(*mode),
            GestureEvent::Zoom { signal } => self.set_zoom(*signal),
            GestureEvent::FrameObserved(_) => {}
        }
    }

    /// Advance the zoom animation by one render tick
    pub fn tick(&mut self) -> u32 {
        self.zoom.step();
        self.zoom.zoom_percent()
    }
}

impl ModeSink for Globe {
    fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            debug!(%mode, "mode unchanged");
            return;
        }
        info!(
            from = %self.mode,
            to = %mode,
            texture = mode.texture(),
            atmosphere = mode.shows_atmosphere(),
            "switching globe mode"
        );
        self.mode = mode;
        self.mode_switches += 1;
    }
}

impl ZoomSink for Globe {
    fn set_zoom(&mut self, signal: f32) {
        self.zoom.set_signal(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{FrameOutput, ModeOrigin};

    #[test]
    fn test_starts_in_first_mode() {
        let globe = Globe::default();
        assert_eq!(globe.mode(), Mode::BlueMarble);
        assert_eq!(globe.mode_switches(), 0);
    }

    #[test]
    fn test_repeated_mode_is_not_a_switch() {
        let mut globe = Globe::default();
        for _ in 0..5 {
            globe.set_mode(Mode::Water);
        }
        assert_eq!(globe.mode(), Mode::Water);
        assert_eq!(globe.mode_switches(), 1);
    }

    #[test]
    fn test_apply_routes_events() {
        let mut globe = Globe::default();
        globe.apply(&GestureEvent::ModeChanged {
            mode: Mode::NightLights,
            origin: ModeOrigin::Manual,
        });
        globe.apply(&GestureEvent::Zoom { signal: 1.0 });
        globe.apply(&GestureEvent::FrameObserved(FrameOutput::default()));

        assert_eq!(globe.mode(), Mode::NightLights);
        assert!(globe.zoom().target() > 2.0);
    }

    #[test]
    fn test_tick_reports_percent() {
        let mut globe = Globe::default();
        globe.set_zoom(1.0);
        let first = globe.tick();
        let second = globe.tick();
        assert!(first > 100);
        assert!(second > first);
    }
}
