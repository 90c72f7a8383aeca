use std::cell::OnceCell;
use std::ffi::c_void;

use glow::HasContext;

use super::api::{ActiveVariable, BufferTarget, GlApi, GlLimit, ShaderStage, Topology, ViewportRect};

type Loader = Box<dyn Fn(&str) -> *const c_void>;

/// `GlApi` over a `glow` function table.
///
/// The table is loaded on the first GL call. `glow` reads `GL_VERSION` while
/// loading, so that call must come after a context has been made current;
/// the lifecycle only issues GL calls once `Device::initialize` succeeded.
pub struct GlowGl {
    loader: Loader,
    gl: OnceCell<glow::Context>,
}

impl GlowGl {
    /// Resolves GL entry points through `loader` (typically `eglGetProcAddress`).
    ///
    /// # Safety
    ///
    /// `loader` must return valid GLES 3.0 function pointers (or null for
    /// unavailable symbols), and every GL call must happen on a thread with
    /// a current context created from the same driver.
    pub unsafe fn from_loader<F>(loader: F) -> Self
    where
        F: Fn(&str) -> *const c_void + 'static,
    {
        Self {
            loader: Box::new(loader),
            gl: OnceCell::new(),
        }
    }

    fn gl(&self) -> &glow::Context {
        self.gl.get_or_init(|| {
            let gl = unsafe { glow::Context::from_loader_function(|name| (self.loader)(name)) };
            log::info!("GL entry points loaded: {:?}", gl.version());
            gl
        })
    }
}

// SAFETY (module-wide): `GlowGl` is only reachable through the lifecycle,
// which issues calls on the thread that made the context current and only
// with handles it created on that context.
impl GlApi for GlowGl {
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type Buffer = <glow::Context as HasContext>::Buffer;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl().create_shader(stage.gl_enum()) }
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        unsafe { self.gl().shader_source(shader, source) }
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl().compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl().get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl().get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl().delete_shader(shader) }
    }

    fn create_program(&mut self) -> Result<Self::Program, String> {
        unsafe { self.gl().create_program() }
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl().attach_shader(program, shader) }
    }

    fn link_program(&mut self, program: Self::Program) {
        unsafe { self.gl().link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl().get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl().get_program_info_log(program) }
    }

    fn delete_program(&mut self, program: Self::Program) {
        unsafe { self.gl().delete_program(program) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        unsafe { self.gl().use_program(program) }
    }

    fn active_attribute_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl().get_active_attributes(program) }
    }

    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveVariable> {
        unsafe { self.gl().get_active_attribute(program, index) }.map(|a| ActiveVariable {
            name: a.name,
            size: a.size,
            gl_type: a.atype,
        })
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl().get_attrib_location(program, name) }
    }

    fn active_uniform_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl().get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveVariable> {
        unsafe { self.gl().get_active_uniform(program, index) }.map(|u| ActiveVariable {
            name: u.name,
            size: u.size,
            gl_type: u.utype,
        })
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl().get_uniform_location(program, name) }
    }

    fn uniform_block_member(&self, program: Self::Program, index: u32) -> Option<(u32, i32)> {
        let block = unsafe {
            self.gl()
                .get_active_uniforms_parameter(program, &[index], glow::UNIFORM_BLOCK_INDEX)
        };
        let block = *block.first()?;
        // Default-block uniforms report -1.
        let block = u32::try_from(block).ok()?;

        let offset = unsafe {
            self.gl()
                .get_active_uniforms_parameter(program, &[index], glow::UNIFORM_OFFSET)
        };
        Some((block, offset.first().copied().unwrap_or(0)))
    }

    fn uniform_block_name(&self, program: Self::Program, block: u32) -> String {
        unsafe { self.gl().get_active_uniform_block_name(program, block) }
    }

    fn uniform_block_data_size(&self, program: Self::Program, block: u32) -> i32 {
        unsafe {
            self.gl().get_active_uniform_block_parameter_i32(
                program,
                block,
                glow::UNIFORM_BLOCK_DATA_SIZE,
            )
        }
    }

    fn uniform_block_binding(&mut self, program: Self::Program, block: u32, binding: u32) {
        unsafe { self.gl().uniform_block_binding(program, block, binding) }
    }

    fn create_buffer(&mut self) -> Result<Self::Buffer, String> {
        unsafe { self.gl().create_buffer() }
    }

    fn upload_buffer(&mut self, target: BufferTarget, buffer: Self::Buffer, data: &[u8]) {
        unsafe {
            self.gl().bind_buffer(target.gl_enum(), Some(buffer));
            self.gl()
                .buffer_data_u8_slice(target.gl_enum(), data, target.usage());
        }
    }

    fn bind_uniform_buffer_base(&mut self, binding: u32, buffer: Self::Buffer) {
        unsafe {
            self.gl()
                .bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(buffer))
        }
    }

    fn delete_buffer(&mut self, buffer: Self::Buffer) {
        unsafe { self.gl().delete_buffer(buffer) }
    }

    fn limit(&self, limit: GlLimit) -> i32 {
        unsafe { self.gl().get_parameter_i32(limit.gl_enum()) }
    }

    fn set_uniform_vec4(&mut self, location: &Self::UniformLocation, value: [f32; 4]) {
        let [x, y, z, w] = value;
        unsafe { self.gl().uniform_4_f32(Some(location), x, y, z, w) }
    }

    fn viewport(&mut self, rect: ViewportRect) {
        unsafe { self.gl().viewport(rect.x, rect.y, rect.width, rect.height) }
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        unsafe { self.gl().clear_color(r, g, b, a) }
    }

    fn clear_color_buffer(&mut self) {
        unsafe { self.gl().clear(glow::COLOR_BUFFER_BIT) }
    }

    fn vertex_attrib_buffer(
        &mut self,
        location: u32,
        buffer: Self::Buffer,
        components: i32,
        stride: i32,
    ) {
        unsafe {
            self.gl().bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl().enable_vertex_attrib_array(location);
            self.gl()
                .vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, 0);
        }
    }

    fn draw_arrays(&mut self, topology: Topology, first: i32, count: i32) {
        unsafe { self.gl().draw_arrays(topology.gl_enum(), first, count) }
    }
}
