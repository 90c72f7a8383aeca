//! Native activity engine crate.
//!
//! Owns the EGL/GLES resource lifecycle of an Android native activity and
//! the frame loop that draws a colored triangle fan into its window.

pub mod device;
pub mod frame;
pub mod gl;
pub mod lifecycle;
pub mod runtime;

pub mod logging;
pub mod scene;
pub mod shader;
pub mod uniform;

#[cfg(test)]
mod testing;
