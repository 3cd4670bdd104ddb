// gilrs platform shim: turns gilrs events into connect/disconnect calls and pad signals

use super::{classify, GamepadDevice, GamepadFamily, PadSignal};
use crate::engine::input::key::GamepadDirection;
use crate::engine::input::manager::InputSystem;
use gilrs::{Axis, Button, EventType, Gilrs};
use glam::Vec2;
use std::collections::HashMap;

/// Snapshot of what gilrs reports about a pad
#[derive(Debug, Clone)]
pub struct GilrsPad {
    name: String,
    vendor_id: Option<u16>,
    product_id: Option<u16>,
}

impl GilrsPad {
    fn from_gamepad(pad: &gilrs::Gamepad<'_>) -> Self {
        Self {
            name: pad.name().to_string(),
            vendor_id: pad.vendor_id(),
            product_id: pad.product_id(),
        }
    }
}

impl GamepadDevice for GilrsPad {
    fn name(&self) -> &str {
        &self.name
    }

    fn vendor_id(&self) -> Option<u16> {
        self.vendor_id
    }

    fn product_id(&self) -> Option<u16> {
        self.product_id
    }
}

/// Last reported stick positions of one pad, in screen space, plus the
/// d-pad hat for pads that report it as axes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadSticks {
    pub left: Vec2,
    pub right: Vec2,
    /// Each component is -1, 0 or 1; Y up-positive as gilrs reports it
    pub hat: Vec2,
}

impl PadSticks {
    /// Fold one gilrs axis change in and return the stick signal it produces.
    /// gilrs reports Y up-positive, so Y is flipped here.
    pub fn apply(&mut self, axis: Axis, value: f32) -> Option<PadSignal> {
        match axis {
            Axis::LeftStickX => self.left.x = value,
            Axis::LeftStickY => self.left.y = -value,
            Axis::RightStickX => self.right.x = value,
            Axis::RightStickY => self.right.y = -value,
            _ => return None,
        }
        match axis {
            Axis::LeftStickX | Axis::LeftStickY => Some(PadSignal::LeftStick(self.left)),
            _ => Some(PadSignal::RightStick(self.right)),
        }
    }

    /// Fold one d-pad hat axis change in. Moving the hat releases the old
    /// direction before pressing the new one.
    pub fn apply_hat(&mut self, axis: Axis, value: f32) -> Vec<PadSignal> {
        let (negative, positive, component) = match axis {
            Axis::DPadX => (GamepadDirection::Left, GamepadDirection::Right, &mut self.hat.x),
            Axis::DPadY => (GamepadDirection::Down, GamepadDirection::Up, &mut self.hat.y),
            _ => return Vec::new(),
        };

        let next = if value > 0.5 {
            1.0
        } else if value < -0.5 {
            -1.0
        } else {
            0.0
        };
        let previous = std::mem::replace(component, next);
        if previous == next {
            return Vec::new();
        }

        let direction = |v: f32| {
            if v > 0.0 {
                Some(positive)
            } else if v < 0.0 {
                Some(negative)
            } else {
                None
            }
        };
        let mut signals = Vec::with_capacity(2);
        if let Some(released) = direction(previous) {
            signals.push(PadSignal::DPadUp(released as u32));
        }
        if let Some(pressed) = direction(next) {
            signals.push(PadSignal::DPadDown(pressed as u32));
        }
        signals
    }
}

/// Native button code gilrs' `button` has on a pad of `family`
pub fn raw_button(family: GamepadFamily, button: Button) -> Option<u32> {
    let shoulders_swapped = family == GamepadFamily::DualShock;
    let code = match button {
        Button::South => 0,
        Button::East => 1,
        Button::West => 2,
        Button::North => 3,
        Button::Start => 4,
        Button::Select => 5,
        Button::LeftTrigger if shoulders_swapped => 7,
        Button::LeftTrigger => 6,
        Button::RightTrigger if shoulders_swapped => 6,
        Button::RightTrigger => 7,
        Button::LeftThumb => 8,
        Button::RightThumb => 9,
        Button::Mode if family == GamepadFamily::Generic => 10,
        _ => return None,
    };
    Some(code)
}

/// Signal for a digital button edge. Analog triggers arrive through
/// `ButtonChanged` instead and are skipped here.
pub fn button_signal(family: GamepadFamily, button: Button, pressed: bool) -> Option<PadSignal> {
    let direction = match button {
        Button::DPadUp => Some(GamepadDirection::Up),
        Button::DPadDown => Some(GamepadDirection::Down),
        Button::DPadLeft => Some(GamepadDirection::Left),
        Button::DPadRight => Some(GamepadDirection::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        let code = direction as u32;
        return Some(if pressed {
            PadSignal::DPadDown(code)
        } else {
            PadSignal::DPadUp(code)
        });
    }

    let code = raw_button(family, button)?;
    Some(if pressed {
        PadSignal::ButtonDown(code)
    } else {
        PadSignal::ButtonUp(code)
    })
}

/// Analog trigger value change
pub fn trigger_signal(button: Button, value: f32) -> Option<PadSignal> {
    match button {
        Button::LeftTrigger2 => Some(PadSignal::LeftTrigger(value)),
        Button::RightTrigger2 => Some(PadSignal::RightTrigger(value)),
        _ => None,
    }
}

/// Polls gilrs and forwards everything to an [`InputSystem`]
pub struct GilrsBackend {
    gilrs: Option<Gilrs>,
    sticks: HashMap<usize, PadSticks>,
    families: HashMap<usize, GamepadFamily>,
}

impl GilrsBackend {
    /// Open gilrs. A platform without gamepad support yields a backend
    /// that does nothing.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                log::warn!("Gamepad support unavailable: {}", err);
                None
            }
        };
        Self {
            gilrs,
            sticks: HashMap::new(),
            families: HashMap::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.gilrs.is_some()
    }

    /// Report every currently connected pad. Call after enabling input,
    /// since disabling drops all slot bindings.
    pub fn announce_connected(&mut self, input: &mut InputSystem) {
        let Some(gilrs) = self.gilrs.as_ref() else {
            return;
        };
        let pads: Vec<(usize, GilrsPad)> = gilrs
            .gamepads()
            .map(|(id, pad)| (usize::from(id), GilrsPad::from_gamepad(&pad)))
            .collect();

        for (index, pad) in pads {
            self.connect(input, index, pad);
        }
    }

    /// Drain pending gilrs events
    pub fn pump(&mut self, input: &mut InputSystem) {
        loop {
            let Some(gilrs) = self.gilrs.as_mut() else {
                return;
            };
            let Some(event) = gilrs.next_event() else {
                return;
            };
            let index = usize::from(event.id);

            match event.event {
                EventType::Connected => {
                    let pad = GilrsPad::from_gamepad(&gilrs.gamepad(event.id));
                    self.connect(input, index, pad);
                }
                EventType::Disconnected => {
                    self.sticks.remove(&index);
                    self.families.remove(&index);
                    input.gamepad_disconnected(index);
                }
                EventType::ButtonPressed(button, _) => {
                    if let Some(signal) = button_signal(self.family(index), button, true) {
                        input.gamepad_signal(index, signal);
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(signal) = button_signal(self.family(index), button, false) {
                        input.gamepad_signal(index, signal);
                    }
                }
                EventType::ButtonChanged(button, value, _) => {
                    if let Some(signal) = trigger_signal(button, value) {
                        input.gamepad_signal(index, signal);
                    }
                }
                EventType::AxisChanged(axis @ (Axis::DPadX | Axis::DPadY), value, _) => {
                    let sticks = self.sticks.entry(index).or_default();
                    for signal in sticks.apply_hat(axis, value) {
                        input.gamepad_signal(index, signal);
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    let sticks = self.sticks.entry(index).or_default();
                    if let Some(signal) = sticks.apply(axis, value) {
                        input.gamepad_signal(index, signal);
                    }
                }
                _ => {}
            }
        }
    }

    fn connect(&mut self, input: &mut InputSystem, index: usize, pad: GilrsPad) {
        self.families.insert(index, classify(&pad));
        self.sticks.insert(index, PadSticks::default());
        input.gamepad_connected(index, Box::new(pad));
    }

    fn family(&self, index: usize) -> GamepadFamily {
        self.families
            .get(&index)
            .copied()
            .unwrap_or(GamepadFamily::Generic)
    }
}

impl Default for GilrsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GilrsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GilrsBackend")
            .field("available", &self.gilrs.is_some())
            .field("pads", &self.families)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::dualshock::DualShockButton;
    use super::super::xbox::Xbox360Button;
    use super::*;

    #[test]
    fn test_face_buttons_share_codes() {
        for family in [GamepadFamily::Xbox360, GamepadFamily::DualShock, GamepadFamily::Generic] {
            assert_eq!(raw_button(family, Button::South), Some(0));
            assert_eq!(raw_button(family, Button::North), Some(3));
            assert_eq!(raw_button(family, Button::RightThumb), Some(9));
        }
    }

    #[test]
    fn test_shoulder_codes_follow_family() {
        assert_eq!(
            raw_button(GamepadFamily::Xbox360, Button::LeftTrigger).and_then(Xbox360Button::from_raw),
            Some(Xbox360Button::LB)
        );
        assert_eq!(
            raw_button(GamepadFamily::DualShock, Button::LeftTrigger).and_then(DualShockButton::from_raw),
            Some(DualShockButton::L1)
        );
        assert_eq!(
            raw_button(GamepadFamily::DualShock, Button::RightTrigger).and_then(DualShockButton::from_raw),
            Some(DualShockButton::R1)
        );
    }

    #[test]
    fn test_mode_button_only_on_generic() {
        assert_eq!(raw_button(GamepadFamily::Generic, Button::Mode), Some(10));
        assert_eq!(raw_button(GamepadFamily::Xbox360, Button::Mode), None);
    }

    #[test]
    fn test_dpad_buttons_become_direction_signals() {
        assert_eq!(
            button_signal(GamepadFamily::Xbox360, Button::DPadLeft, true),
            Some(PadSignal::DPadDown(GamepadDirection::Left as u32))
        );
        assert_eq!(
            button_signal(GamepadFamily::DualShock, Button::DPadUp, false),
            Some(PadSignal::DPadUp(GamepadDirection::Up as u32))
        );
    }

    #[test]
    fn test_analog_triggers_skip_button_edges() {
        assert_eq!(button_signal(GamepadFamily::Xbox360, Button::LeftTrigger2, true), None);
        assert_eq!(
            trigger_signal(Button::RightTrigger2, 0.5),
            Some(PadSignal::RightTrigger(0.5))
        );
        assert_eq!(trigger_signal(Button::South, 1.0), None);
    }

    #[test]
    fn test_sticks_flip_y_and_keep_other_component() {
        let mut sticks = PadSticks::default();
        sticks.apply(Axis::LeftStickX, 0.5);
        assert_eq!(
            sticks.apply(Axis::LeftStickY, 0.25),
            Some(PadSignal::LeftStick(Vec2::new(0.5, -0.25)))
        );
        assert_eq!(
            sticks.apply(Axis::RightStickX, -1.0),
            Some(PadSignal::RightStick(Vec2::new(-1.0, 0.0)))
        );
        assert_eq!(sticks.apply(Axis::DPadX, 1.0), None);
    }

    #[test]
    fn test_hat_axes_become_direction_edges() {
        let mut sticks = PadSticks::default();
        let left = GamepadDirection::Left as u32;
        let right = GamepadDirection::Right as u32;

        assert_eq!(sticks.apply_hat(Axis::DPadX, -1.0), vec![PadSignal::DPadDown(left)]);
        // Same position again is not an edge
        assert!(sticks.apply_hat(Axis::DPadX, -1.0).is_empty());
        assert_eq!(
            sticks.apply_hat(Axis::DPadX, 1.0),
            vec![PadSignal::DPadUp(left), PadSignal::DPadDown(right)]
        );
        assert_eq!(sticks.apply_hat(Axis::DPadX, 0.0), vec![PadSignal::DPadUp(right)]);

        assert_eq!(
            sticks.apply_hat(Axis::DPadY, 1.0),
            vec![PadSignal::DPadDown(GamepadDirection::Up as u32)]
        );
        assert!(sticks.apply_hat(Axis::LeftStickX, 1.0).is_empty());
    }
}
