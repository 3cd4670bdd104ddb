// Fallback for unrecognized pads

use super::family::PadAdapter;
use super::GamepadFamily;
use crate::engine::input::key::GamepadDirection;

/// Raw indices at or above this are dropped
pub const MAX_BUTTONS: u32 = 32;

/// Minimal common contract: raw button indices and both sticks.
/// No d-pad or trigger wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAdapter;

impl PadAdapter for GenericAdapter {
    fn family(&self) -> GamepadFamily {
        GamepadFamily::Generic
    }

    fn map_button(&self, raw: u32) -> Option<u32> {
        (raw < MAX_BUTTONS).then_some(raw)
    }

    fn map_direction(&self, _raw: u32) -> Option<GamepadDirection> {
        None
    }

    fn has_triggers(&self) -> bool {
        false
    }

    fn has_dpad(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_pass_through() {
        assert_eq!(GenericAdapter.map_button(0), Some(0));
        assert_eq!(GenericAdapter.map_button(17), Some(17));
        assert_eq!(GenericAdapter.map_button(MAX_BUTTONS), None);
    }

    #[test]
    fn test_no_dpad_or_triggers() {
        assert_eq!(GenericAdapter.map_direction(0), None);
        assert!(!GenericAdapter.has_dpad());
        assert!(!GenericAdapter.has_triggers());
    }
}
