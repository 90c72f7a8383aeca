//! Frame loop: event draining and per-frame draw.

mod config;
mod driver;

pub use config::{FrameConfig, ViewportMode};
pub use driver::FrameDriver;
