// Keyboard adapter

use crate::engine::input::axes::{RawAxisBuffers, SourceClass};
use crate::engine::input::config::{KeyAxisBindings, KeyDirection};
use crate::engine::input::key::{keycodes, AxisName, CompositeKey, DeviceClass, PlayerSlot};
use crate::engine::input::keymap::KeymapStore;

/// Record a key transition and refresh the keyboard axes if the key is bound.
///
/// OS key repeat arrives as repeated `pressed == true` writes, which the
/// keymap store ignores.
pub fn key_changed(
    keymap: &mut KeymapStore,
    raw: &mut RawAxisBuffers,
    bindings: &KeyAxisBindings,
    code: u32,
    pressed: bool,
) {
    if code > keycodes::MAX {
        log::debug!("Ignoring out-of-range key code {}", code);
        return;
    }

    keymap.set_button(CompositeKey::key(code), pressed);

    if bindings.is_bound(code) {
        sync_axes(keymap, raw, bindings);
    }
}

/// Recompute horizontal/vertical from the held state of every bound key.
/// Opposing directions cancel out.
pub fn sync_axes(keymap: &KeymapStore, raw: &mut RawAxisBuffers, bindings: &KeyAxisBindings) {
    let mut values = [(AxisName::Horizontal, 0.0), (AxisName::Vertical, 0.0)];

    for direction in KeyDirection::ALL {
        if !keymap.any_held(DeviceClass::Key, PlayerSlot::One, bindings.keys_for(direction)) {
            continue;
        }
        if let Some((_, value)) = values.iter_mut().find(|(axis, _)| *axis == direction.axis()) {
            *value += direction.sign();
        }
    }

    for (axis, value) in values {
        raw.set(SourceClass::Keyboard, axis, PlayerSlot::One, value);
    }
}
