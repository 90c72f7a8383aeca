//! Uniform block packing and upload.

mod packer;

pub use packer::{PackError, UniformBlockLayout, UniformBuffer, UniformVec4, pack};
