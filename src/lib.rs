// Unified input: keyboard, pointer, virtual joysticks and up to four gamepads,
// merged into one per-frame snapshot

pub mod core;
pub mod engine;

pub use engine::frame_loop::FrameLoop;
pub use engine::input::*;
