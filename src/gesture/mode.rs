//! Globe display modes selected by bimanual digit gestures

use serde::{Deserialize, Serialize};

use super::classifier::DigitClass;

/// Visual mode of the globe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Mode {
    #[default]
    BlueMarble,
    Topology,
    Water,
    NightLights,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::BlueMarble, Mode::Topology, Mode::Water, Mode::NightLights];

    /// Mode number shown to the user (1-4)
    pub fn number(self) -> u8 {
        match self {
            Mode::BlueMarble => 1,
            Mode::Topology => 2,
            Mode::Water => 3,
            Mode::NightLights => 4,
        }
    }

    /// Digits 1-4 select a mode. The open hand never does.
    pub fn from_digit(digit: DigitClass) -> Option<Self> {
        match digit {
            DigitClass::One => Some(Mode::BlueMarble),
            DigitClass::Two => Some(Mode::Topology),
            DigitClass::Three => Some(Mode::Water),
            DigitClass::Four => Some(Mode::NightLights),
            DigitClass::None | DigitClass::OpenHand => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::BlueMarble => "Blue Marble",
            Mode::Topology => "Topology",
            Mode::Water => "Water",
            Mode::NightLights => "Night Lights",
        }
    }

    /// Texture asset the renderer samples particle colors from
    pub fn texture(self) -> &'static str {
        match self {
            Mode::BlueMarble => "earth-blue-marble.jpg",
            Mode::Topology => "earth-topology.png",
            Mode::Water => "earth-water.png",
            Mode::NightLights => "earth-night.jpg",
        }
    }

    /// Night view renders without the atmosphere glow
    pub fn shows_atmosphere(self) -> bool {
        !matches!(self, Mode::NightLights)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.name())
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode.number()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mode must be between 1 and 4, got {0}")]
pub struct ModeError(pub u8);

impl TryFrom<u8> for Mode {
    type Error = ModeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.number() == value)
            .ok_or(ModeError(value))
    }
}
