// Input options and keyboard axis bindings

use super::key::{keycodes, AxisName};
use glam::{BVec2, Vec2};
use std::collections::HashMap;

/// Direction a key pushes one of the keyboard axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDirection {
    Left,
    Right,
    Up,
    Down,
}

impl KeyDirection {
    pub const ALL: [KeyDirection; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Axis this direction writes to
    pub fn axis(self) -> AxisName {
        match self {
            Self::Left | Self::Right => AxisName::Horizontal,
            Self::Up | Self::Down => AxisName::Vertical,
        }
    }

    /// Contribution to the axis when held
    pub fn sign(self) -> f32 {
        match self {
            Self::Right | Self::Up => 1.0,
            Self::Left | Self::Down => -1.0,
        }
    }
}

/// Default WASD + arrow key bindings
pub fn default_key_axes() -> Vec<(u32, KeyDirection)> {
    vec![
        (keycodes::A, KeyDirection::Left),
        (keycodes::D, KeyDirection::Right),
        (keycodes::W, KeyDirection::Up),
        (keycodes::S, KeyDirection::Down),
        (keycodes::LEFT, KeyDirection::Left),
        (keycodes::RIGHT, KeyDirection::Right),
        (keycodes::UP, KeyDirection::Up),
        (keycodes::DOWN, KeyDirection::Down),
    ]
}

/// Mapping from key codes to keyboard axis directions
#[derive(Debug, Clone, PartialEq)]
pub struct KeyAxisBindings {
    /// key code -> direction
    bindings: HashMap<u32, KeyDirection>,

    /// Reverse mapping for quick lookups (direction -> all keys)
    direction_to_keys: HashMap<KeyDirection, Vec<u32>>,
}

impl KeyAxisBindings {
    /// Create an empty binding table
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            direction_to_keys: HashMap::new(),
        }
    }

    /// Create a table from a list of bindings
    pub fn from_bindings(bindings: Vec<(u32, KeyDirection)>) -> Self {
        let mut table = Self::empty();
        for (key, direction) in bindings {
            table.bind(key, direction);
        }
        table
    }

    /// Bind a key to a direction, replacing any previous binding of that key
    pub fn bind(&mut self, key: u32, direction: KeyDirection) {
        self.unbind_key(key);
        self.bindings.insert(key, direction);
        self.direction_to_keys.entry(direction).or_default().push(key);
    }

    /// Remove a key's binding
    pub fn unbind_key(&mut self, key: u32) {
        if let Some(direction) = self.bindings.remove(&key) {
            if let Some(keys) = self.direction_to_keys.get_mut(&direction) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.direction_to_keys.remove(&direction);
                }
            }
        }
    }

    /// Remove every key bound to a direction
    pub fn unbind_direction(&mut self, direction: KeyDirection) {
        if let Some(keys) = self.direction_to_keys.remove(&direction) {
            for key in keys {
                self.bindings.remove(&key);
            }
        }
    }

    /// Direction a key is bound to
    pub fn direction(&self, key: u32) -> Option<KeyDirection> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to a direction
    pub fn keys_for(&self, direction: KeyDirection) -> &[u32] {
        self.direction_to_keys
            .get(&direction)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_bound(&self, key: u32) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.direction_to_keys.clear();
    }

    /// Restore the WASD + arrow defaults
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        for (key, direction) in default_key_axes() {
            self.bind(key, direction);
        }
    }
}

impl Default for KeyAxisBindings {
    fn default() -> Self {
        Self::from_bindings(default_key_axes())
    }
}

/// Virtual joystick tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickOptions {
    /// Per-component threshold at or below which a value reads as zero
    pub dead_zone: f32,
    pub left_sensitivity: f32,
    pub right_sensitivity: f32,
    /// Flip the right stick's Y to match screen-space look
    pub invert_right_y: bool,
}

impl Default for JoystickOptions {
    fn default() -> Self {
        Self {
            dead_zone: 0.1,
            left_sensitivity: 1.0,
            right_sensitivity: 1.0,
            invert_right_y: true,
        }
    }
}

/// Physical gamepad stick tuning, shared by every family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadOptions {
    /// Magnitude threshold for both sticks
    pub dead_zone: f32,
    pub left_sensitivity: Vec2,
    pub right_sensitivity: Vec2,
    pub invert_left: BVec2,
    pub invert_right: BVec2,
}

impl Default for GamepadOptions {
    fn default() -> Self {
        Self {
            dead_zone: 0.25,
            left_sensitivity: Vec2::ONE,
            right_sensitivity: Vec2::ONE,
            // Pads report stick-down as positive
            invert_left: BVec2::new(false, true),
            invert_right: BVec2::FALSE,
        }
    }
}

/// Pointer tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerOptions {
    /// Multiplier applied to pointer movement before it feeds mouseX/mouseY
    pub sensitivity: Vec2,
    /// Wheel deltas with magnitude at or below this read as zero
    pub wheel_dead_zone: f32,
}

impl Default for PointerOptions {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::ONE,
            wheel_dead_zone: 0.1,
        }
    }
}

/// Invalid option values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("{field} dead zone must be within [0, 1), got {value}")]
    DeadZoneOutOfRange { field: &'static str, value: f32 },

    #[error("{field} sensitivity must be finite, got {value}")]
    NonFiniteSensitivity { field: &'static str, value: f32 },
}

/// Options passed when enabling user input
#[derive(Debug, Clone, PartialEq)]
pub struct InputOptions {
    /// Host hint: suppress the platform's default handling of consumed events
    pub prevent_default: bool,
    /// Host hint: attach listeners in the capture phase
    pub use_capture: bool,
    pub enable_virtual_joystick: bool,
    pub disable_right_stick: bool,
    pub joystick: JoystickOptions,
    pub gamepad: GamepadOptions,
    pub pointer: PointerOptions,
    pub key_axes: KeyAxisBindings,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            prevent_default: false,
            use_capture: false,
            enable_virtual_joystick: false,
            disable_right_stick: false,
            joystick: JoystickOptions::default(),
            gamepad: GamepadOptions::default(),
            pointer: PointerOptions::default(),
            key_axes: KeyAxisBindings::default(),
        }
    }
}

impl InputOptions {
    pub fn with_virtual_joystick(mut self, enabled: bool) -> Self {
        self.enable_virtual_joystick = enabled;
        self
    }

    pub fn with_right_stick_disabled(mut self, disabled: bool) -> Self {
        self.disable_right_stick = disabled;
        self
    }

    pub fn with_prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    pub fn with_use_capture(mut self, capture: bool) -> Self {
        self.use_capture = capture;
        self
    }

    pub fn with_joystick(mut self, joystick: JoystickOptions) -> Self {
        self.joystick = joystick;
        self
    }

    pub fn with_gamepad(mut self, gamepad: GamepadOptions) -> Self {
        self.gamepad = gamepad;
        self
    }

    pub fn with_pointer(mut self, pointer: PointerOptions) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_key_axes(mut self, key_axes: KeyAxisBindings) -> Self {
        self.key_axes = key_axes;
        self
    }

    /// Every invalid field, in a stable order
    pub fn errors(&self) -> Vec<OptionsError> {
        let mut errors = Vec::new();

        let dead_zones = [
            ("joystick", self.joystick.dead_zone),
            ("gamepad", self.gamepad.dead_zone),
            ("wheel", self.pointer.wheel_dead_zone),
        ];
        for (field, value) in dead_zones {
            if !(0.0..1.0).contains(&value) {
                errors.push(OptionsError::DeadZoneOutOfRange { field, value });
            }
        }

        let sensitivities = [
            ("left joystick", self.joystick.left_sensitivity),
            ("right joystick", self.joystick.right_sensitivity),
            ("left stick x", self.gamepad.left_sensitivity.x),
            ("left stick y", self.gamepad.left_sensitivity.y),
            ("right stick x", self.gamepad.right_sensitivity.x),
            ("right stick y", self.gamepad.right_sensitivity.y),
            ("pointer x", self.pointer.sensitivity.x),
            ("pointer y", self.pointer.sensitivity.y),
        ];
        for (field, value) in sensitivities {
            if !value.is_finite() {
                errors.push(OptionsError::NonFiniteSensitivity { field, value });
            }
        }

        errors
    }

    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), OptionsError> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Replace every invalid field with its default, logging each fix
    pub fn sanitized(mut self) -> Self {
        for err in self.errors() {
            log::warn!("Invalid input option, using default: {}", err);
        }

        let joystick = JoystickOptions::default();
        let gamepad = GamepadOptions::default();
        let pointer = PointerOptions::default();

        let fix_zone = |value: f32, default: f32| {
            if (0.0..1.0).contains(&value) {
                value
            } else {
                default
            }
        };
        let fix_scalar = |value: f32, default: f32| if value.is_finite() { value } else { default };
        let fix_vec = |value: Vec2, default: Vec2| {
            Vec2::new(fix_scalar(value.x, default.x), fix_scalar(value.y, default.y))
        };

        self.joystick.dead_zone = fix_zone(self.joystick.dead_zone, joystick.dead_zone);
        self.gamepad.dead_zone = fix_zone(self.gamepad.dead_zone, gamepad.dead_zone);
        self.pointer.wheel_dead_zone =
            fix_zone(self.pointer.wheel_dead_zone, pointer.wheel_dead_zone);

        self.joystick.left_sensitivity =
            fix_scalar(self.joystick.left_sensitivity, joystick.left_sensitivity);
        self.joystick.right_sensitivity =
            fix_scalar(self.joystick.right_sensitivity, joystick.right_sensitivity);
        self.gamepad.left_sensitivity =
            fix_vec(self.gamepad.left_sensitivity, gamepad.left_sensitivity);
        self.gamepad.right_sensitivity =
            fix_vec(self.gamepad.right_sensitivity, gamepad.right_sensitivity);
        self.pointer.sensitivity = fix_vec(self.pointer.sensitivity, pointer.sensitivity);

        self
    }
}
