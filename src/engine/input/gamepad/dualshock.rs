// DualShock layout

use super::family::PadAdapter;
use super::GamepadFamily;
use crate::engine::input::key::{GamepadButton, GamepadDirection};

/// Native DualShock button codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DualShockButton {
    Cross = 0,
    Circle = 1,
    Square = 2,
    Triangle = 3,
    Options = 4,
    Share = 5,
    R1 = 6,
    L1 = 7,
    LeftStick = 8,
    RightStick = 9,
}

impl DualShockButton {
    pub fn from_raw(raw: u32) -> Option<Self> {
        let button = match raw {
            0 => Self::Cross,
            1 => Self::Circle,
            2 => Self::Square,
            3 => Self::Triangle,
            4 => Self::Options,
            5 => Self::Share,
            6 => Self::R1,
            7 => Self::L1,
            8 => Self::LeftStick,
            9 => Self::RightStick,
            _ => return None,
        };
        Some(button)
    }

    /// Face buttons map by position, so Cross is A and Circle is B
    pub fn normalized(self) -> GamepadButton {
        match self {
            Self::Cross => GamepadButton::A,
            Self::Circle => GamepadButton::B,
            Self::Square => GamepadButton::X,
            Self::Triangle => GamepadButton::Y,
            Self::Options => GamepadButton::Start,
            Self::Share => GamepadButton::Back,
            Self::R1 => GamepadButton::RightBumper,
            Self::L1 => GamepadButton::LeftBumper,
            Self::LeftStick => GamepadButton::LeftStick,
            Self::RightStick => GamepadButton::RightStick,
        }
    }
}

/// DualShock pads: full button set, d-pad and analog triggers
#[derive(Debug, Clone, Copy, Default)]
pub struct DualShockAdapter;

impl PadAdapter for DualShockAdapter {
    fn family(&self) -> GamepadFamily {
        GamepadFamily::DualShock
    }

    fn map_button(&self, raw: u32) -> Option<u32> {
        DualShockButton::from_raw(raw).map(|b| b.normalized().index())
    }

    fn map_direction(&self, raw: u32) -> Option<GamepadDirection> {
        GamepadDirection::from_index(raw)
    }
}
