use crate::gl::ShaderStage;

/// A shader stage failed to compile (or could not be created).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{stage} shader failed to compile: {log}")]
pub struct CompileError {
    pub stage: ShaderStage,
    pub log: String,
}

/// The program failed to link (or could not be created).
#[derive(Debug, Clone, thiserror::Error)]
#[error("program failed to link: {log}")]
pub struct LinkError {
    pub log: String,
}
