//! Host runtime.
//!
//! Binds the activity looper to the frame driver and wires the real EGL and
//! GL backends together.

#[cfg(target_os = "android")]
mod android;
mod config;

#[cfg(target_os = "android")]
pub use android::{AndroidEvents, Runtime};
pub use config::RuntimeConfig;
