// Capability interface implemented once per gamepad family

use super::dualshock::DualShockAdapter;
use super::generic::GenericAdapter;
use super::xbox::Xbox360Adapter;
use super::{GamepadFamily, PadSignal};
use crate::core::math::{invert_axes, radial_dead_zone};
use crate::engine::input::axes::{RawAxisBuffers, SourceClass, LOOK_AXES, MOVE_AXES};
use crate::engine::input::config::GamepadOptions;
use crate::engine::input::key::{CompositeKey, GamepadDirection, PlayerSlot, TriggerSide};
use crate::engine::input::keymap::KeymapStore;
use glam::{BVec2, Vec2};

/// Everything a family adapter may write for the slot it is bound to
pub struct PadContext<'a> {
    pub slot: PlayerSlot,
    pub keymap: &'a mut KeymapStore,
    pub raw: &'a mut RawAxisBuffers,
    pub options: &'a GamepadOptions,
}

/// Sensitivity, then magnitude dead zone, then per-axis inversion
pub fn normalize_stick(value: Vec2, sensitivity: Vec2, dead_zone: f32, invert: BVec2) -> Vec2 {
    invert_axes(radial_dead_zone(value * sensitivity, dead_zone), invert)
}

/// Per-family signal handling.
///
/// The connection manager only talks to pads through this trait. Families
/// differ in how native button and d-pad codes map onto the normalized
/// indices and in which capabilities they wire at all.
pub trait PadAdapter {
    fn family(&self) -> GamepadFamily;

    /// Native button code to normalized button index
    fn map_button(&self, raw: u32) -> Option<u32>;

    /// Native d-pad code to a direction; `None` when the family has no d-pad
    fn map_direction(&self, raw: u32) -> Option<GamepadDirection>;

    /// Whether analog triggers are wired
    fn has_triggers(&self) -> bool {
        true
    }

    /// Whether a d-pad is wired
    fn has_dpad(&self) -> bool {
        true
    }

    fn on_button_down(&self, ctx: &mut PadContext<'_>, raw: u32) {
        self.on_button(ctx, raw, true);
    }

    fn on_button_up(&self, ctx: &mut PadContext<'_>, raw: u32) {
        self.on_button(ctx, raw, false);
    }

    fn on_button(&self, ctx: &mut PadContext<'_>, raw: u32, pressed: bool) {
        match self.map_button(raw) {
            Some(button) => ctx
                .keymap
                .set_button(CompositeKey::gamepad_button(button, ctx.slot), pressed),
            None => log::debug!(
                "{:?} pad on player {} sent unknown button {}",
                self.family(),
                ctx.slot.number(),
                raw
            ),
        }
    }

    fn on_left_stick(&self, ctx: &mut PadContext<'_>, value: Vec2) {
        let options = ctx.options;
        let normalized = normalize_stick(
            value,
            options.left_sensitivity,
            options.dead_zone,
            options.invert_left,
        );
        ctx.raw
            .set_pair(SourceClass::Gamepad, MOVE_AXES, ctx.slot, normalized);
    }

    fn on_right_stick(&self, ctx: &mut PadContext<'_>, value: Vec2) {
        let options = ctx.options;
        let normalized = normalize_stick(
            value,
            options.right_sensitivity,
            options.dead_zone,
            options.invert_right,
        );
        ctx.raw
            .set_pair(SourceClass::Gamepad, LOOK_AXES, ctx.slot, normalized);
    }

    fn on_dpad(&self, ctx: &mut PadContext<'_>, raw: u32, pressed: bool) {
        match self.map_direction(raw) {
            Some(direction) => ctx
                .keymap
                .set_button(CompositeKey::gamepad_direction(direction, ctx.slot), pressed),
            None => log::debug!(
                "{:?} pad on player {} sent unmapped d-pad code {}",
                self.family(),
                ctx.slot.number(),
                raw
            ),
        }
    }

    fn on_trigger(&self, ctx: &mut PadContext<'_>, side: TriggerSide, value: f32) {
        if !self.has_triggers() {
            log::debug!(
                "{:?} pad on player {} has no trigger wiring",
                self.family(),
                ctx.slot.number()
            );
            return;
        }
        if !value.is_finite() {
            log::debug!(
                "Ignoring non-finite trigger value {} on player {}",
                value,
                ctx.slot.number()
            );
            return;
        }
        ctx.keymap.set_trigger(side, ctx.slot, value.clamp(0.0, 1.0));
    }

    /// Dispatch one raw signal to the matching handler
    fn handle(&self, ctx: &mut PadContext<'_>, signal: PadSignal) {
        match signal {
            PadSignal::ButtonDown(raw) => self.on_button_down(ctx, raw),
            PadSignal::ButtonUp(raw) => self.on_button_up(ctx, raw),
            PadSignal::LeftStick(value) => self.on_left_stick(ctx, value),
            PadSignal::RightStick(value) => self.on_right_stick(ctx, value),
            PadSignal::DPadDown(raw) => self.on_dpad(ctx, raw, true),
            PadSignal::DPadUp(raw) => self.on_dpad(ctx, raw, false),
            PadSignal::LeftTrigger(value) => self.on_trigger(ctx, TriggerSide::Left, value),
            PadSignal::RightTrigger(value) => self.on_trigger(ctx, TriggerSide::Right, value),
        }
    }
}

/// The adapter implementing a family
pub fn adapter_for(family: GamepadFamily) -> Box<dyn PadAdapter> {
    match family {
        GamepadFamily::Xbox360 => Box::new(Xbox360Adapter),
        GamepadFamily::DualShock => Box::new(DualShockAdapter),
        GamepadFamily::Generic => Box::new(GenericAdapter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::key::AxisName;
    use approx::assert_relative_eq;

    struct Harness {
        keymap: KeymapStore,
        raw: RawAxisBuffers,
        options: GamepadOptions,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                keymap: KeymapStore::new(),
                raw: RawAxisBuffers::new(),
                options: GamepadOptions::default(),
            }
        }

        fn send(&mut self, family: GamepadFamily, slot: PlayerSlot, signal: PadSignal) {
            let mut ctx = PadContext {
                slot,
                keymap: &mut self.keymap,
                raw: &mut self.raw,
                options: &self.options,
            };
            adapter_for(family).handle(&mut ctx, signal);
        }

        fn axis(&self, axis: AxisName, slot: PlayerSlot) -> f32 {
            self.raw.get(SourceClass::Gamepad, axis, slot)
        }
    }

    #[test]
    fn test_normalize_stick_order() {
        // Sensitivity pushes the stick out of the dead zone before it is checked
        let v = normalize_stick(Vec2::new(0.2, 0.0), Vec2::splat(2.0), 0.25, BVec2::FALSE);
        assert_eq!(v, Vec2::new(0.4, 0.0));

        let inverted = normalize_stick(Vec2::new(0.0, 0.5), Vec2::ONE, 0.25, BVec2::new(false, true));
        assert_eq!(inverted, Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_left_stick_defaults_flip_y() {
        let mut h = Harness::new();
        h.send(GamepadFamily::Xbox360, PlayerSlot::Two, PadSignal::LeftStick(Vec2::new(0.5, 0.8)));

        assert_eq!(h.axis(AxisName::Horizontal, PlayerSlot::Two), 0.5);
        assert_eq!(h.axis(AxisName::Vertical, PlayerSlot::Two), -0.8);
        assert_eq!(h.axis(AxisName::Horizontal, PlayerSlot::One), 0.0);
    }

    #[test]
    fn test_stick_dead_zone_is_radial() {
        let mut h = Harness::new();
        h.send(GamepadFamily::Generic, PlayerSlot::One, PadSignal::RightStick(Vec2::new(0.1, 0.1)));
        assert_eq!(h.axis(AxisName::MouseX, PlayerSlot::One), 0.0);
        assert_eq!(h.axis(AxisName::MouseY, PlayerSlot::One), 0.0);

        h.send(GamepadFamily::Generic, PlayerSlot::One, PadSignal::RightStick(Vec2::new(0.2, 0.2)));
        assert_relative_eq!(h.axis(AxisName::MouseX, PlayerSlot::One), 0.2);
        assert_relative_eq!(h.axis(AxisName::MouseY, PlayerSlot::One), 0.2);
    }

    #[test]
    fn test_trigger_is_clamped_and_stored() {
        let mut h = Harness::new();
        h.send(GamepadFamily::DualShock, PlayerSlot::Three, PadSignal::RightTrigger(1.4));
        let key = CompositeKey::gamepad_trigger(TriggerSide::Right, PlayerSlot::Three);
        assert_eq!(h.keymap.analog(key), 1.0);
    }

    #[test]
    fn test_non_finite_trigger_is_dropped() {
        let mut h = Harness::new();
        let fired = std::rc::Rc::new(std::cell::RefCell::new(0));
        let f = fired.clone();
        h.keymap.callbacks_mut().add_trigger(
            TriggerSide::Left,
            PlayerSlot::One,
            Box::new(move |_| *f.borrow_mut() += 1),
        );

        h.send(GamepadFamily::Xbox360, PlayerSlot::One, PadSignal::LeftTrigger(0.5));
        h.send(GamepadFamily::Xbox360, PlayerSlot::One, PadSignal::LeftTrigger(f32::NAN));
        h.send(GamepadFamily::Xbox360, PlayerSlot::One, PadSignal::LeftTrigger(f32::NAN));

        let key = CompositeKey::gamepad_trigger(TriggerSide::Left, PlayerSlot::One);
        assert_eq!(h.keymap.analog(key), 0.5);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_generic_ignores_triggers_and_dpad() {
        let mut h = Harness::new();
        h.send(GamepadFamily::Generic, PlayerSlot::One, PadSignal::LeftTrigger(0.5));
        h.send(GamepadFamily::Generic, PlayerSlot::One, PadSignal::DPadDown(0));
        assert!(h.keymap.is_empty());
    }

    #[test]
    fn test_adapter_for_reports_family() {
        for family in [GamepadFamily::Xbox360, GamepadFamily::DualShock, GamepadFamily::Generic] {
            assert_eq!(adapter_for(family).family(), family);
        }
    }
}
