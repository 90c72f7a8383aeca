use std::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Primitive assembly mode for `draw_arrays`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    TriangleFan,
}

impl Topology {
    pub fn gl_enum(self) -> u32 {
        match self {
            Topology::TriangleFan => glow::TRIANGLE_FAN,
        }
    }
}

/// Buffer binding target together with its upload usage hint.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    /// Vertex data, uploaded once.
    Array,
    /// Uniform block storage, may be rewritten.
    Uniform,
}

impl BufferTarget {
    pub fn gl_enum(self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::Uniform => glow::UNIFORM_BUFFER,
        }
    }

    pub fn usage(self) -> u32 {
        match self {
            BufferTarget::Array => glow::STATIC_DRAW,
            BufferTarget::Uniform => glow::DYNAMIC_DRAW,
        }
    }
}

/// Viewport rectangle in framebuffer pixels (origin bottom-left, GL convention).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Active attribute or uniform as reported by the driver.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ActiveVariable {
    pub name: String,
    /// Array length (1 for non-arrays).
    pub size: i32,
    /// GL type enum, e.g. `FLOAT_VEC4`.
    pub gl_type: u32,
}

/// Implementation limits logged after context creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GlLimit {
    MaxVertexUniformVectors,
    MaxFragmentUniformVectors,
    MaxVertexAttribs,
    MaxVertexOutputComponents,
    MaxFragmentInputComponents,
}

impl GlLimit {
    pub const ALL: [GlLimit; 5] = [
        GlLimit::MaxVertexUniformVectors,
        GlLimit::MaxFragmentUniformVectors,
        GlLimit::MaxVertexAttribs,
        GlLimit::MaxVertexOutputComponents,
        GlLimit::MaxFragmentInputComponents,
    ];

    pub fn gl_enum(self) -> u32 {
        match self {
            GlLimit::MaxVertexUniformVectors => glow::MAX_VERTEX_UNIFORM_VECTORS,
            GlLimit::MaxFragmentUniformVectors => glow::MAX_FRAGMENT_UNIFORM_VECTORS,
            GlLimit::MaxVertexAttribs => glow::MAX_VERTEX_ATTRIBS,
            GlLimit::MaxVertexOutputComponents => glow::MAX_VERTEX_OUTPUT_COMPONENTS,
            GlLimit::MaxFragmentInputComponents => glow::MAX_FRAGMENT_INPUT_COMPONENTS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GlLimit::MaxVertexUniformVectors => "max vertex uniform vectors",
            GlLimit::MaxFragmentUniformVectors => "max fragment uniform vectors",
            GlLimit::MaxVertexAttribs => "max vertex attribs",
            GlLimit::MaxVertexOutputComponents => "max vertex output components",
            GlLimit::MaxFragmentInputComponents => "max fragment input components",
        }
    }
}

/// Number of float components carried by a float-typed GL variable.
///
/// Returns `None` for non-float types (ints, matrices, samplers).
pub fn float_components(gl_type: u32) -> Option<i32> {
    match gl_type {
        glow::FLOAT => Some(1),
        glow::FLOAT_VEC2 => Some(2),
        glow::FLOAT_VEC3 => Some(3),
        glow::FLOAT_VEC4 => Some(4),
        _ => None,
    }
}

/// Human-readable GLSL spelling of a GL type enum, for diagnostics.
pub fn type_name(gl_type: u32) -> &'static str {
    match gl_type {
        glow::FLOAT => "float",
        glow::FLOAT_VEC2 => "vec2",
        glow::FLOAT_VEC3 => "vec3",
        glow::FLOAT_VEC4 => "vec4",
        glow::INT => "int",
        glow::INT_VEC2 => "ivec2",
        glow::INT_VEC3 => "ivec3",
        glow::INT_VEC4 => "ivec4",
        glow::UNSIGNED_INT => "uint",
        glow::UNSIGNED_INT_VEC4 => "uvec4",
        glow::BOOL => "bool",
        glow::FLOAT_MAT2 => "mat2",
        glow::FLOAT_MAT3 => "mat3",
        glow::FLOAT_MAT4 => "mat4",
        glow::SAMPLER_2D => "sampler2D",
        _ => "other",
    }
}

/// The GLES 3.0 calls this program issues.
///
/// Every method assumes a current context on the calling thread.
pub trait GlApi {
    type Shader: Copy + Eq + fmt::Debug;
    type Program: Copy + Eq + fmt::Debug;
    type Buffer: Copy + Eq + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// Full info log; empty when the driver reports no log.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&mut self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&mut self) -> Result<Self::Program, String>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn link_program(&mut self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&mut self, program: Self::Program);
    fn use_program(&mut self, program: Option<Self::Program>);

    // ── reflection ────────────────────────────────────────────────────────

    fn active_attribute_count(&self, program: Self::Program) -> u32;
    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveVariable>;
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn active_uniform_count(&self, program: Self::Program) -> u32;
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveVariable>;
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;
    /// `(block index, byte offset)` of the active uniform at `index`, or `None`
    /// when it lives in the default block.
    fn uniform_block_member(&self, program: Self::Program, index: u32) -> Option<(u32, i32)>;
    fn uniform_block_name(&self, program: Self::Program, block: u32) -> String;
    fn uniform_block_data_size(&self, program: Self::Program, block: u32) -> i32;
    fn uniform_block_binding(&mut self, program: Self::Program, block: u32, binding: u32);

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&mut self) -> Result<Self::Buffer, String>;
    fn upload_buffer(&mut self, target: BufferTarget, buffer: Self::Buffer, data: &[u8]);
    fn bind_uniform_buffer_base(&mut self, binding: u32, buffer: Self::Buffer);
    fn delete_buffer(&mut self, buffer: Self::Buffer);

    // ── state + draw ──────────────────────────────────────────────────────

    fn limit(&self, limit: GlLimit) -> i32;
    fn set_uniform_vec4(&mut self, location: &Self::UniformLocation, value: [f32; 4]);
    fn viewport(&mut self, rect: ViewportRect);
    fn clear_color(&mut self, rgba: [f32; 4]);
    fn clear_color_buffer(&mut self);
    /// Enables `location` and sources it as tightly packed floats from `buffer`.
    fn vertex_attrib_buffer(
        &mut self,
        location: u32,
        buffer: Self::Buffer,
        components: i32,
        stride: i32,
    );
    fn draw_arrays(&mut self, topology: Topology, first: i32, count: i32);
}
