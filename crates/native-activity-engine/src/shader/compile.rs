use crate::device::InitError;
use crate::gl::{GlApi, ShaderStage};

use super::error::{CompileError, LinkError};
use super::reflect::{ReflectionInfo, reflect};

const NO_INFO_LOG: &str = "no info log available";

/// GLSL sources for the two stages.
#[derive(Debug, Copy, Clone)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl ShaderSources<'static> {
    /// The colored triangle-fan program shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            vertex: include_str!("../../shaders/triangle.vert"),
            fragment: include_str!("../../shaders/triangle.frag"),
        }
    }
}

fn non_empty_log(log: String) -> String {
    if log.trim().is_empty() {
        NO_INFO_LOG.to_string()
    } else {
        log
    }
}

/// Creates and compiles one shader stage.
///
/// On failure the shader object is deleted before returning.
pub fn compile_shader<G: GlApi>(
    gl: &mut G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, CompileError> {
    let shader = gl.create_shader(stage).map_err(|reason| {
        log::error!("glCreateShader({stage}) failed: {reason}");
        CompileError { stage, log: reason }
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.shader_compile_status(shader) {
        return Ok(shader);
    }

    let log = non_empty_log(gl.shader_info_log(shader));
    log::error!("{stage} shader compile failed: {log}");
    gl.delete_shader(shader);
    Err(CompileError { stage, log })
}

/// Links `vertex` and `fragment` into a new program.
///
/// On success both shaders stay attached. On failure the program object is
/// deleted; the shaders are left to the caller.
pub fn link_program<G: GlApi>(
    gl: &mut G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, LinkError> {
    let program = gl.create_program().map_err(|reason| {
        log::error!("glCreateProgram failed: {reason}");
        LinkError { log: reason }
    })?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    if gl.program_link_status(program) {
        return Ok(program);
    }

    let log = non_empty_log(gl.program_info_log(program));
    log::error!("program link failed: {log}");
    gl.delete_program(program);
    Err(LinkError { log })
}

/// Linked program plus its shader objects and reflection data.
#[derive(Debug)]
pub struct ShaderProgram<G: GlApi> {
    vertex: G::Shader,
    fragment: G::Shader,
    program: G::Program,
    reflection: ReflectionInfo<G::UniformLocation>,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Compiles both stages, links them and reflects the result.
    ///
    /// Nothing created here survives a failure.
    pub fn build(gl: &mut G, sources: &ShaderSources<'_>) -> Result<Self, InitError> {
        let vertex = compile_shader(gl, ShaderStage::Vertex, sources.vertex)?;

        let fragment = match compile_shader(gl, ShaderStage::Fragment, sources.fragment) {
            Ok(fragment) => fragment,
            Err(e) => {
                gl.delete_shader(vertex);
                return Err(e.into());
            }
        };

        let program = match link_program(gl, vertex, fragment) {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(e.into());
            }
        };

        let reflection = reflect(gl, program);

        Ok(Self {
            vertex,
            fragment,
            program,
            reflection,
        })
    }

    pub fn program(&self) -> G::Program {
        self.program
    }

    pub fn reflection(&self) -> &ReflectionInfo<G::UniformLocation> {
        &self.reflection
    }

    /// Deletes the program and both shader objects.
    pub fn destroy(self, gl: &mut G) {
        gl.delete_program(self.program);
        gl.delete_shader(self.vertex);
        gl.delete_shader(self.fragment);
    }
}
