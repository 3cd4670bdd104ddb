// Pointer adapter: buttons, motion, wheel

use crate::core::math::dead_zone;
use crate::engine::input::axes::{RawAxisBuffers, SourceClass, LOOK_AXES};
use crate::engine::input::config::PointerOptions;
use crate::engine::input::key::{CompositeKey, PlayerSlot};
use crate::engine::input::keymap::KeymapStore;
use glam::Vec2;

/// Single-source pointer values that bypass the resolver
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerBuffers {
    /// Last known client position; persists across frames
    pub client: Vec2,
    /// Raw wheel deltas summed over the current frame; cleared after every tick
    pub wheel: f32,
}

impl PointerBuffers {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn button_changed(keymap: &mut KeymapStore, button: u32, pressed: bool) {
    keymap.set_button(CompositeKey::pointer(button), pressed);
}

/// Record a pointer move: client position is stored as is, the movement
/// (scaled by sensitivity) accumulates into player one's look axes for
/// this frame.
pub fn moved(
    pointer: &mut PointerBuffers,
    raw: &mut RawAxisBuffers,
    options: &PointerOptions,
    client: Vec2,
    movement: Vec2,
) {
    pointer.client = client;

    let scaled = movement * options.sensitivity;
    let (x_axis, y_axis) = LOOK_AXES;
    raw.add(SourceClass::Keyboard, x_axis, PlayerSlot::One, scaled.x);
    raw.add(SourceClass::Keyboard, y_axis, PlayerSlot::One, scaled.y);
}

/// Record a wheel delta. Deltas within a frame add up; the dead zone is
/// applied once to the sum when the frame is published.
pub fn wheel(pointer: &mut PointerBuffers, delta: f32) {
    if !delta.is_finite() {
        log::debug!("Ignoring non-finite wheel delta {}", delta);
        return;
    }
    pointer.wheel += delta;
}

/// This frame's wheel value after the dead zone
pub fn frame_wheel(pointer: &PointerBuffers, options: &PointerOptions) -> f32 {
    dead_zone(pointer.wheel, options.wheel_dead_zone)
}

/// Zero the per-frame motion written by `moved`
pub fn clear_motion(raw: &mut RawAxisBuffers) {
    let (x_axis, y_axis) = LOOK_AXES;
    raw.set(SourceClass::Keyboard, x_axis, PlayerSlot::One, 0.0);
    raw.set(SourceClass::Keyboard, y_axis, PlayerSlot::One, 0.0);
}
