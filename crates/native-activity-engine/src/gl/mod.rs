//! OpenGL ES seam.
//!
//! `GlApi` lists the GLES 3.0 calls issued by the shader builder, the uniform
//! packer and the frame driver. `GlowGl` implements it over `glow`.

mod api;
mod glow_backend;

pub use api::{
    ActiveVariable, BufferTarget, GlApi, GlLimit, ShaderStage, Topology, ViewportRect,
    float_components, type_name,
};
pub use glow_backend::GlowGl;
