// Input handling system
//
// Normalizes keyboard, pointer, virtual joystick and gamepad input for up to
// four players into one snapshot per frame.
//
// ## Architecture
//
// - `key`: Player slots, device classes and the composite key every button is stored under
// - `keymap`: Button/trigger levels with edge detection and callback dispatch
// - `callbacks`: Per-class, per-player handler lists
// - `axes`: Raw per-source axis buffers and the published snapshot
// - `resolver`: Per-frame precedence merge of the raw buffers
// - `adapters`: Keyboard, pointer and virtual joystick front ends
// - `gamepad`: Family classification, family adapters, slot bindings and the gilrs shim
// - `config`: Options, key-to-axis bindings and validation
// - `manager`: The `InputSystem` tying everything together
//
// ## Usage Example
//
// ```rust
// use unified_input::{InputOptions, InputSystem, PlayerSlot, UserInputAxis};
//
// let mut input = InputSystem::new();
// input.enable_user_input(InputOptions::default());
//
// // Platform events may arrive at any time
// input.key_down(unified_input::keycodes::D);
//
// // Once per tick, after scene update
// input.update();
//
// let x = input.user_input(UserInputAxis::Horizontal, PlayerSlot::One);
// ```

pub mod adapters;
pub mod axes;
pub mod callbacks;
pub mod config;
pub mod gamepad;
pub mod key;
pub mod keymap;
pub mod manager;
pub mod resolver;

// Re-export commonly used types
pub use adapters::{JoystickSide, VirtualJoystick, VirtualJoystickFactory};
pub use axes::{MergedAxisSnapshot, PlayerAxes};
pub use config::{InputOptions, KeyAxisBindings, KeyDirection, OptionsError};
pub use gamepad::{GamepadDevice, GamepadFamily, GilrsBackend, PadSignal};
pub use key::{
    keycodes, GamepadButton, GamepadDirection, PlayerSlot, TriggerSide, UserInputAxis,
};
pub use manager::InputSystem;
