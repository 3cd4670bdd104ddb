// Virtual joystick adapter
//
// The on-screen widgets are external; this adapter owns their lifetime and
// samples them once per frame from the update driver.

use crate::core::math::dead_zone_per_axis;
use crate::engine::input::axes::{RawAxisBuffers, SourceClass, LOOK_AXES, MOVE_AXES};
use crate::engine::input::config::JoystickOptions;
use crate::engine::input::key::PlayerSlot;
use glam::Vec2;

/// Scale applied to a released stick's delta every frame
pub const RELEASE_DECAY: f32 = 0.9;

/// Which on-screen stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoystickSide {
    /// Feeds horizontal/vertical
    Left,
    /// Feeds mouseX/mouseY
    Right,
}

/// An on-screen joystick widget
pub trait VirtualJoystick {
    /// Current offset of the thumb from the stick's center
    fn delta_position(&self) -> Vec2;

    /// Overwrite the offset (used to settle a released stick)
    fn set_delta_position(&mut self, delta: Vec2);

    /// Whether the stick is being touched
    fn pressed(&self) -> bool;

    /// Tear down the widget's drawing surface
    fn release(&mut self) {}
}

/// Creates joystick widgets when virtual joysticks are enabled
pub trait VirtualJoystickFactory {
    fn create(&mut self, side: JoystickSide) -> Option<Box<dyn VirtualJoystick>>;
}

/// The (optional) left and right sticks
#[derive(Default)]
pub struct JoystickPair {
    left: Option<Box<dyn VirtualJoystick>>,
    right: Option<Box<dyn VirtualJoystick>>,
}

impl JoystickPair {
    pub fn new(
        left: Option<Box<dyn VirtualJoystick>>,
        right: Option<Box<dyn VirtualJoystick>>,
    ) -> Self {
        Self { left, right }
    }

    /// Ask the factory for the sticks the options call for
    pub fn create(factory: &mut dyn VirtualJoystickFactory, with_right: bool) -> Self {
        let left = factory.create(JoystickSide::Left);
        if left.is_none() {
            log::warn!("Virtual joystick factory returned no left stick");
        }
        let right = if with_right {
            let right = factory.create(JoystickSide::Right);
            if right.is_none() {
                log::warn!("Virtual joystick factory returned no right stick");
            }
            right
        } else {
            None
        };
        Self { left, right }
    }

    pub fn has(&self, side: JoystickSide) -> bool {
        match side {
            JoystickSide::Left => self.left.is_some(),
            JoystickSide::Right => self.right.is_some(),
        }
    }

    /// Decay, dead-zone and write both sticks into the joystick raw buffers.
    /// A missing stick writes zero.
    pub fn sample(&mut self, raw: &mut RawAxisBuffers, options: &JoystickOptions) {
        let left = self
            .left
            .as_deref_mut()
            .map(|stick| sample_stick(stick, options.dead_zone, options.left_sensitivity))
            .unwrap_or(Vec2::ZERO);

        let mut right = self
            .right
            .as_deref_mut()
            .map(|stick| sample_stick(stick, options.dead_zone, options.right_sensitivity))
            .unwrap_or(Vec2::ZERO);
        if options.invert_right_y {
            right.y = -right.y;
        }

        raw.set_pair(SourceClass::VirtualJoystick, MOVE_AXES, PlayerSlot::One, left);
        raw.set_pair(SourceClass::VirtualJoystick, LOOK_AXES, PlayerSlot::One, right);
    }

    /// Release and drop both widgets
    pub fn release(&mut self) {
        for mut stick in [self.left.take(), self.right.take()].into_iter().flatten() {
            stick.release();
        }
    }
}

impl std::fmt::Debug for JoystickPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoystickPair")
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}

/// Released sticks settle toward the center by `RELEASE_DECAY` per frame
/// instead of snapping back. Each component is zeroed at or below the dead
/// zone and passed through unchanged above it.
fn sample_stick<J: VirtualJoystick + ?Sized>(stick: &mut J, dead_zone: f32, sensitivity: f32) -> Vec2 {
    let mut delta = stick.delta_position();
    if !stick.pressed() {
        delta *= RELEASE_DECAY;
        stick.set_delta_position(delta);
    }
    dead_zone_per_axis(delta, dead_zone) * sensitivity
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::input::key::AxisName;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared state so tests can poke a stick after handing it over
    #[derive(Debug, Default)]
    pub(crate) struct StickState {
        pub delta: Vec2,
        pub pressed: bool,
        pub released: bool,
    }

    pub(crate) struct FakeJoystick(pub Rc<RefCell<StickState>>);

    impl VirtualJoystick for FakeJoystick {
        fn delta_position(&self) -> Vec2 {
            self.0.borrow().delta
        }

        fn set_delta_position(&mut self, delta: Vec2) {
            self.0.borrow_mut().delta = delta;
        }

        fn pressed(&self) -> bool {
            self.0.borrow().pressed
        }

        fn release(&mut self) {
            self.0.borrow_mut().released = true;
        }
    }

    pub(crate) fn stick(delta: Vec2, pressed: bool) -> (Rc<RefCell<StickState>>, Box<dyn VirtualJoystick>) {
        let state = Rc::new(RefCell::new(StickState {
            delta,
            pressed,
            released: false,
        }));
        (state.clone(), Box::new(FakeJoystick(state)))
    }

    #[test]
    fn test_pressed_stick_passes_through() {
        let (_, left) = stick(Vec2::new(0.6, -0.3), true);
        let mut pair = JoystickPair::new(Some(left), None);
        let mut raw = RawAxisBuffers::new();

        pair.sample(&mut raw, &JoystickOptions::default());
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::Horizontal, PlayerSlot::One), 0.6);
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::Vertical, PlayerSlot::One), -0.3);
    }

    #[test]
    fn test_released_stick_decays_and_writes_back() {
        let (state, left) = stick(Vec2::new(1.0, 0.0), false);
        let mut pair = JoystickPair::new(Some(left), None);
        let mut raw = RawAxisBuffers::new();
        let options = JoystickOptions::default();

        pair.sample(&mut raw, &options);
        assert_relative_eq!(state.borrow().delta.x, 0.9);
        pair.sample(&mut raw, &options);
        assert_relative_eq!(
            raw.get(SourceClass::VirtualJoystick, AxisName::Horizontal, PlayerSlot::One),
            0.81,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_dead_zone_is_per_component() {
        let (_, left) = stick(Vec2::new(0.05, 0.5), true);
        let mut pair = JoystickPair::new(Some(left), None);
        let mut raw = RawAxisBuffers::new();

        pair.sample(&mut raw, &JoystickOptions::default());
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::Horizontal, PlayerSlot::One), 0.0);
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::Vertical, PlayerSlot::One), 0.5);
    }

    #[test]
    fn test_right_stick_y_inverted_by_default() {
        let (_, right) = stick(Vec2::new(0.4, 0.5), true);
        let mut pair = JoystickPair::new(None, Some(right));
        let mut raw = RawAxisBuffers::new();

        pair.sample(&mut raw, &JoystickOptions::default());
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::MouseX, PlayerSlot::One), 0.4);
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::MouseY, PlayerSlot::One), -0.5);

        let options = JoystickOptions {
            invert_right_y: false,
            ..Default::default()
        };
        pair.sample(&mut raw, &options);
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::MouseY, PlayerSlot::One), 0.5);
    }

    #[test]
    fn test_sensitivity_applies_after_dead_zone() {
        let (_, left) = stick(Vec2::new(0.1, 0.5), true);
        let mut pair = JoystickPair::new(Some(left), None);
        let mut raw = RawAxisBuffers::new();
        let options = JoystickOptions {
            left_sensitivity: 2.0,
            ..Default::default()
        };

        pair.sample(&mut raw, &options);
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::Horizontal, PlayerSlot::One), 0.0);
        assert_eq!(raw.get(SourceClass::VirtualJoystick, AxisName::Vertical, PlayerSlot::One), 1.0);
    }

    #[test]
    fn test_release_drops_widgets() {
        let (left_state, left) = stick(Vec2::ZERO, false);
        let (right_state, right) = stick(Vec2::ZERO, false);
        let mut pair = JoystickPair::new(Some(left), Some(right));

        pair.release();
        assert!(left_state.borrow().released);
        assert!(right_state.borrow().released);
        assert!(!pair.has(JoystickSide::Left));
        assert!(!pair.has(JoystickSide::Right));

        // Releasing again is harmless
        pair.release();
    }

    struct CountingFactory {
        created: Vec<JoystickSide>,
    }

    impl VirtualJoystickFactory for CountingFactory {
        fn create(&mut self, side: JoystickSide) -> Option<Box<dyn VirtualJoystick>> {
            self.created.push(side);
            Some(stick(Vec2::ZERO, false).1)
        }
    }

    #[test]
    fn test_create_respects_right_stick_flag() {
        let mut factory = CountingFactory { created: Vec::new() };
        let pair = JoystickPair::create(&mut factory, false);
        assert!(pair.has(JoystickSide::Left));
        assert!(!pair.has(JoystickSide::Right));
        assert_eq!(factory.created, vec![JoystickSide::Left]);
    }
}
