//! Shader compile/link and program reflection.

mod compile;
mod error;
mod reflect;

pub use compile::{ShaderProgram, ShaderSources, compile_shader, link_program};
pub use error::{CompileError, LinkError};
pub use reflect::{AttributeInfo, BlockMember, ReflectionInfo, UniformInfo, reflect};
