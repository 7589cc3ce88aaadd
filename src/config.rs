//! Configuration loading and management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::gesture::{Classifier, DistanceRange};
use crate::globe::{ZoomAnimator, MAX_SCALE, MIN_SCALE, SMOOTHING};
use crate::interpreter::{InterpreterConfig, ModeRepeat};

const SOCKET_VAR: &str = "GLOBE_GESTURE_SOCKET";
const MODE_REPEAT_VAR: &str = "GLOBE_GESTURE_MODE_REPEAT";
const TICK_MS_VAR: &str = "GLOBE_GESTURE_TICK_MS";
const THUMB_THRESHOLD_VAR: &str = "GLOBE_GESTURE_THUMB_THRESHOLD";
const FINGER_MARGIN_VAR: &str = "GLOBE_GESTURE_FINGER_MARGIN";
const DISTANCE_MIN_VAR: &str = "GLOBE_GESTURE_DISTANCE_MIN";
const DISTANCE_MAX_VAR: &str = "GLOBE_GESTURE_DISTANCE_MAX";
const ZOOM_SMOOTHING_VAR: &str = "GLOBE_GESTURE_ZOOM_SMOOTHING";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Unix domain socket frames arrive on
    pub socket_path: PathBuf,

    /// Directory for runtime data
    pub data_dir: PathBuf,

    /// Interval between zoom animation steps
    pub render_tick: Duration,

    pub interpreter: InterpreterConfig,

    /// Scale animation driven by zoom signals
    pub zoom: ZoomAnimator,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Self::from_lookup(&home, |key| std::env::var(key).ok())
    }

    /// Build configuration from a home directory and a variable lookup
    pub fn from_lookup<F>(home: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("globe-gesture");

        let socket_path = lookup(SOCKET_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("daemon.sock"));

        let mode_repeat = match lookup(MODE_REPEAT_VAR) {
            Some(value) => value
                .parse::<ModeRepeat>()
                .with_context(|| format!("invalid {}", MODE_REPEAT_VAR))?,
            None => ModeRepeat::default(),
        };

        let tick_ms = match lookup(TICK_MS_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid {}: {:?}", TICK_MS_VAR, value))?,
            None => 16,
        };
        if tick_ms == 0 {
            bail!("{} must be greater than zero", TICK_MS_VAR);
        }

        let defaults = Classifier::default();
        let classifier = Classifier {
            thumb_threshold: positive_float(&lookup, THUMB_THRESHOLD_VAR)?
                .unwrap_or(defaults.thumb_threshold),
            finger_margin: positive_float(&lookup, FINGER_MARGIN_VAR)?
                .unwrap_or(defaults.finger_margin),
        };

        let defaults = DistanceRange::default();
        let distance = DistanceRange {
            min: float(&lookup, DISTANCE_MIN_VAR)?.unwrap_or(defaults.min),
            max: float(&lookup, DISTANCE_MAX_VAR)?.unwrap_or(defaults.max),
        };
        if !distance.is_valid() {
            bail!("distance range is empty: {:?}", distance);
        }

        let smoothing = positive_float(&lookup, ZOOM_SMOOTHING_VAR)?.unwrap_or(SMOOTHING);
        if smoothing > 1.0 {
            bail!("{} must be at most 1, got {}", ZOOM_SMOOTHING_VAR, smoothing);
        }

        Ok(Self {
            socket_path,
            data_dir,
            render_tick: Duration::from_millis(tick_ms),
            interpreter: InterpreterConfig {
                classifier,
                distance,
                mode_repeat,
            },
            zoom: ZoomAnimator::new(MIN_SCALE, MAX_SCALE, smoothing),
        })
    }

    /// Ensure data directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("failed to create {}", self.data_dir.display()))?;
        Ok(())
    }
}

/// Read an optional finite float
fn float<F>(lookup: &F, key: &str) -> Result<Option<f32>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    let parsed = value
        .trim()
        .parse::<f32>()
        .with_context(|| format!("invalid {}: {:?}", key, value))?;
    if !parsed.is_finite() {
        bail!("{} must be finite, got {:?}", key, value);
    }
    Ok(Some(parsed))
}

fn positive_float<F>(lookup: &F, key: &str) -> Result<Option<f32>>
where
    F: Fn(&str) -> Option<String>,
{
    match float(lookup, key)? {
        Some(value) if value <= 0.0 => bail!("{} must be positive, got {}", key, value),
        other => Ok(other),
    }
}
