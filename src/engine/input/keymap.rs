// Keymap store with edge detection

use super::callbacks::CallbackRegistry;
use super::key::{CompositeKey, DeviceClass, PlayerSlot, TriggerSide};
use std::collections::HashMap;

/// Stored state of a digital input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub held: bool,
}

/// Value stored under a composite key
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyState {
    Button(ButtonState),
    Analog(f32),
}

/// Associative store from composite key to current state.
///
/// Owns the callback registry so that every write is edge-checked against
/// the previous value before anything fires.
#[derive(Debug, Default)]
pub struct KeymapStore {
    states: HashMap<CompositeKey, KeyState>,
    callbacks: CallbackRegistry,
}

impl KeymapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a button level, firing down/press or up callbacks on a transition.
    /// Writing the value already stored is a no-op.
    pub fn set_button(&mut self, key: CompositeKey, pressed: bool) {
        let previous = self.button(key);
        if previous == pressed {
            return;
        }

        self.states
            .insert(key, KeyState::Button(ButtonState { held: pressed }));

        if pressed {
            self.callbacks.fire_down(key.class, key.player, key.index);
        } else {
            self.callbacks.fire_up(key.class, key.player, key.index);
        }
    }

    /// Stored button level, `false` when absent
    pub fn button(&self, key: CompositeKey) -> bool {
        match self.states.get(&key) {
            Some(KeyState::Button(state)) => state.held,
            _ => false,
        }
    }

    /// Write a trigger value, firing trigger callbacks when it changes
    pub fn set_trigger(&mut self, side: TriggerSide, player: PlayerSlot, value: f32) {
        let key = CompositeKey::gamepad_trigger(side, player);
        if self.analog(key) == value {
            return;
        }
        self.states.insert(key, KeyState::Analog(value));
        self.callbacks.fire_trigger(side, player, value);
    }

    /// Stored analog value, `0.0` when absent
    pub fn analog(&self, key: CompositeKey) -> f32 {
        match self.states.get(&key) {
            Some(KeyState::Analog(value)) => *value,
            _ => 0.0,
        }
    }

    /// Whether any key of `class` is held (used to synthesize keyboard axes)
    pub fn any_held(&self, class: DeviceClass, player: PlayerSlot, indices: &[u32]) -> bool {
        indices
            .iter()
            .any(|&index| self.button(CompositeKey::new(class, index, player)))
    }

    /// Release every held gamepad button and direction of one player and
    /// drop its triggers to zero, firing the matching up/trigger callbacks,
    /// then forget the player's gamepad entries.
    pub fn release_gamepad(&mut self, player: PlayerSlot) {
        let mut held: Vec<CompositeKey> = self
            .states
            .iter()
            .filter(|(key, state)| {
                key.player == player
                    && key.is_gamepad()
                    && matches!(state, KeyState::Button(ButtonState { held: true }))
            })
            .map(|(key, _)| *key)
            .collect();
        held.sort_by_key(|key| (key.class as u8, key.index));

        for key in held {
            self.set_button(key, false);
        }
        for side in [TriggerSide::Left, TriggerSide::Right] {
            self.set_trigger(side, player, 0.0);
        }

        self.states
            .retain(|key, _| !(key.player == player && key.is_gamepad()));
    }

    /// Drop every stored state and every callback
    pub fn clear(&mut self) {
        self.states.clear();
        self.callbacks.clear();
    }

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut CallbackRegistry {
        &mut self.callbacks
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
