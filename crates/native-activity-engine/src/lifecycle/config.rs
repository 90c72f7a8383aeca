use crate::shader::ShaderSources;
use crate::uniform::UniformVec4;

/// What gets built on every window-init.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub sources: ShaderSources<'static>,

    /// Default-block uniform rewritten every frame.
    pub frame_uniform: String,

    /// Uniform block filled once after link.
    pub uniform_block: String,

    /// `(member, value)` pairs packed into `uniform_block`.
    pub block_fields: Vec<(String, UniformVec4)>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sources: ShaderSources::builtin(),
            frame_uniform: "test".to_string(),
            uniform_block: "block".to_string(),
            block_fields: vec![("status".to_string(), UniformVec4([0.5, 0.0, 0.0, 0.0]))],
        }
    }
}
