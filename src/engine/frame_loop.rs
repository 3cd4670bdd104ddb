/// Per-frame driver for hosts embedding the input system
///
/// Counts frames and carries a pause flag. Input is ticked on every frame,
/// paused or not, so a paused scene can still be resumed from the keyboard
/// or a pad.
use crate::engine::input::InputSystem;

/// Frame state
#[derive(Debug, Default)]
pub struct FrameLoop {
    /// Whether the scene is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new frame, returning whether the scene should advance
    pub fn begin_frame(&mut self) -> bool {
        self.frame_count += 1;
        !self.paused
    }

    /// Publish this frame's input. Call after the scene update.
    pub fn end_frame(&mut self, input: &mut InputSystem) {
        input.update();
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Scene paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Scene resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}
