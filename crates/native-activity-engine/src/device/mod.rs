//! EGL display, surface and context management.
//!
//! This module is responsible for:
//! - connecting to the default display and selecting a config
//! - creating/destroying the window surface and rendering context
//! - presenting frames

mod display;
mod egl;
mod error;
mod init;
#[cfg(target_os = "android")]
mod khronos;

pub use display::{Device, DisplayConnection, WindowTarget};
pub use egl::{ConfigAttrib, DisplayString, EglApi, WINDOW_BIT};
pub use error::{InitError, PresentError};
pub use init::{ConfigRequirements, EglInit};
#[cfg(target_os = "android")]
pub use khronos::KhronosEgl;
