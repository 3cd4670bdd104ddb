// Engine modules: frame timing and input

pub mod frame_loop;
pub mod input;
