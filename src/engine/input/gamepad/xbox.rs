// Xbox 360 layout

use super::family::PadAdapter;
use super::GamepadFamily;
use crate::engine::input::key::{GamepadButton, GamepadDirection};

/// Native Xbox 360 button codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Xbox360Button {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    Start = 4,
    Back = 5,
    LB = 6,
    RB = 7,
    LeftStick = 8,
    RightStick = 9,
}

impl Xbox360Button {
    pub fn from_raw(raw: u32) -> Option<Self> {
        let button = match raw {
            0 => Self::A,
            1 => Self::B,
            2 => Self::X,
            3 => Self::Y,
            4 => Self::Start,
            5 => Self::Back,
            6 => Self::LB,
            7 => Self::RB,
            8 => Self::LeftStick,
            9 => Self::RightStick,
            _ => return None,
        };
        Some(button)
    }

    pub fn normalized(self) -> GamepadButton {
        match self {
            Self::A => GamepadButton::A,
            Self::B => GamepadButton::B,
            Self::X => GamepadButton::X,
            Self::Y => GamepadButton::Y,
            Self::Start => GamepadButton::Start,
            Self::Back => GamepadButton::Back,
            Self::LB => GamepadButton::LeftBumper,
            Self::RB => GamepadButton::RightBumper,
            Self::LeftStick => GamepadButton::LeftStick,
            Self::RightStick => GamepadButton::RightStick,
        }
    }
}

/// Xbox 360 pads: full button set, d-pad and analog triggers
#[derive(Debug, Clone, Copy, Default)]
pub struct Xbox360Adapter;

impl PadAdapter for Xbox360Adapter {
    fn family(&self) -> GamepadFamily {
        GamepadFamily::Xbox360
    }

    fn map_button(&self, raw: u32) -> Option<u32> {
        Xbox360Button::from_raw(raw).map(|b| b.normalized().index())
    }

    fn map_direction(&self, raw: u32) -> Option<GamepadDirection> {
        GamepadDirection::from_index(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_map_one_to_one() {
        let adapter = Xbox360Adapter;
        for raw in 0..10 {
            assert_eq!(adapter.map_button(raw), Some(raw));
        }
        assert_eq!(adapter.map_button(10), None);
    }

    #[test]
    fn test_bumpers() {
        assert_eq!(Xbox360Button::LB.normalized(), GamepadButton::LeftBumper);
        assert_eq!(Xbox360Button::from_raw(7), Some(Xbox360Button::RB));
    }

    #[test]
    fn test_dpad_and_triggers_wired() {
        let adapter = Xbox360Adapter;
        assert!(adapter.has_dpad());
        assert!(adapter.has_triggers());
        assert_eq!(adapter.map_direction(3), Some(GamepadDirection::Right));
    }
}
