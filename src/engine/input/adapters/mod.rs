// Device adapters for keyboard, pointer and virtual joysticks
//
// Each adapter translates one source's raw events into writes against the
// keymap store and its own raw axis buffers. Adapters never read each
// other's buffers; only the resolver does. Gamepad families live in
// `super::gamepad`.

pub mod joystick;
pub mod keyboard;
pub mod pointer;

pub use joystick::{JoystickPair, JoystickSide, VirtualJoystick, VirtualJoystickFactory};
pub use pointer::PointerBuffers;
