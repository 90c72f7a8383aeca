//! Recording EGL/GL backends for unit tests.
//!
//! Handles are plain integers; every live object is tracked so tests can
//! assert that create and destroy calls balance.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::device::{ConfigAttrib, ConfigRequirements, DisplayString, EglApi, WINDOW_BIT};
use crate::gl::{ActiveVariable, BufferTarget, GlApi, GlLimit, ShaderStage, Topology, ViewportRect};
use crate::lifecycle::{EventSink, EventSource, InputStatus, LifecycleCommand, LoopControl};

// ── EGL ──────────────────────────────────────────────────────────────────────

/// Native window stand-in; the number identifies it in recorded calls.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MockWindow(pub u32);

/// The single EGL step a `MockEgl` refuses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EglFailure {
    NoDisplay,
    Initialize,
    NoMatchingConfig,
    CreateSurface,
    CreateContext,
    MakeCurrent,
    SwapBuffers,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EglCall {
    DefaultDisplay,
    Initialize,
    SetWindowFormat(u32, i32),
    CreateSurface(u32),
    CreateContext(i32),
    MakeCurrent(Option<(u32, u32)>),
    SwapBuffers(u32),
    DestroySurface(u32),
    DestroyContext(u32),
}

const DISPLAY: u32 = 1;
const PBUFFER_CONFIG: u32 = 10;
const WINDOW_CONFIG: u32 = 11;

#[derive(Debug, Default)]
pub struct MockEgl {
    failure: Option<EglFailure>,
    surface_size: Option<(i32, i32)>,
    next_handle: u32,
    surfaces: BTreeSet<u32>,
    contexts: BTreeSet<u32>,
    current: Option<(u32, u32)>,
    calls: Vec<EglCall>,
}

impl MockEgl {
    pub const NATIVE_VISUAL_ID: i32 = 1;

    pub fn failing(failure: EglFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn with_surface_size(mut self, width: i32, height: i32) -> Self {
        self.surface_size = Some((width, height));
        self
    }

    /// Changes what the live surface reports, as a window resize would.
    pub fn set_surface_size(&mut self, width: i32, height: i32) {
        self.surface_size = Some((width, height));
    }

    pub fn current(&self) -> Option<(u32, u32)> {
        self.current
    }

    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn live_contexts(&self) -> usize {
        self.contexts.len()
    }

    pub fn calls(&self) -> &[EglCall] {
        &self.calls
    }

    pub fn initialize_calls(&self) -> usize {
        self.calls.iter().filter(|c| **c == EglCall::Initialize).count()
    }

    pub fn swap_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EglCall::SwapBuffers(_)))
            .count()
    }

    pub fn client_versions(&self) -> Vec<i32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EglCall::CreateContext(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn window_formats(&self) -> Vec<(u32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EglCall::SetWindowFormat(w, f) => Some((*w, *f)),
                _ => None,
            })
            .collect()
    }

    fn fails(&self, step: EglFailure) -> bool {
        self.failure == Some(step)
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        100 + self.next_handle
    }
}

impl EglApi for MockEgl {
    type Display = u32;
    type Config = u32;
    type Surface = u32;
    type Context = u32;
    type Window = MockWindow;

    fn default_display(&mut self) -> Option<u32> {
        self.calls.push(EglCall::DefaultDisplay);
        (!self.fails(EglFailure::NoDisplay)).then_some(DISPLAY)
    }

    fn initialize(&mut self, _display: u32) -> Result<(i32, i32), String> {
        self.calls.push(EglCall::Initialize);
        if self.fails(EglFailure::Initialize) {
            return Err("EGL_NOT_INITIALIZED".into());
        }
        Ok((1, 4))
    }

    fn query_string(&self, _display: u32, which: DisplayString) -> Option<String> {
        Some(format!("mock {}", which.label()))
    }

    fn configs(&self, _display: u32) -> Result<Vec<u32>, String> {
        Ok(vec![PBUFFER_CONFIG, WINDOW_CONFIG])
    }

    fn config_attrib(&self, _display: u32, config: u32, attrib: ConfigAttrib) -> Option<i32> {
        let window = config == WINDOW_CONFIG;
        let value = match attrib {
            ConfigAttrib::BufferSize => 32,
            ConfigAttrib::RedSize | ConfigAttrib::GreenSize | ConfigAttrib::BlueSize => 8,
            ConfigAttrib::AlphaSize => 8,
            ConfigAttrib::DepthSize if window => 24,
            ConfigAttrib::DepthSize => 0,
            ConfigAttrib::SurfaceType if window => WINDOW_BIT | 0x1,
            ConfigAttrib::SurfaceType => 0x1,
            ConfigAttrib::NativeVisualId if window => Self::NATIVE_VISUAL_ID,
            ConfigAttrib::NativeVisualId => 2,
        };
        Some(value)
    }

    fn choose_config(
        &self,
        display: u32,
        requirements: &ConfigRequirements,
    ) -> Result<Option<u32>, String> {
        if self.fails(EglFailure::NoMatchingConfig) {
            return Ok(None);
        }
        Ok(self
            .configs(display)?
            .into_iter()
            .find(|&c| requirements.matches(|a| self.config_attrib(display, c, a))))
    }

    fn set_window_format(&mut self, window: &MockWindow, native_visual_id: i32) {
        self.calls
            .push(EglCall::SetWindowFormat(window.0, native_visual_id));
    }

    fn create_window_surface(
        &mut self,
        _display: u32,
        _config: u32,
        window: &MockWindow,
    ) -> Result<u32, String> {
        self.calls.push(EglCall::CreateSurface(window.0));
        if self.fails(EglFailure::CreateSurface) {
            return Err("EGL_BAD_NATIVE_WINDOW".into());
        }
        let surface = self.handle();
        self.surfaces.insert(surface);
        Ok(surface)
    }

    fn create_context(
        &mut self,
        _display: u32,
        _config: u32,
        client_version: i32,
    ) -> Result<u32, String> {
        self.calls.push(EglCall::CreateContext(client_version));
        if self.fails(EglFailure::CreateContext) {
            return Err("EGL_BAD_CONFIG".into());
        }
        let context = self.handle();
        self.contexts.insert(context);
        Ok(context)
    }

    fn make_current(&mut self, _display: u32, target: Option<(u32, u32)>) -> Result<(), String> {
        self.calls.push(EglCall::MakeCurrent(target));
        if target.is_some() && self.fails(EglFailure::MakeCurrent) {
            return Err("EGL_BAD_MATCH".into());
        }
        self.current = target;
        Ok(())
    }

    fn surface_size(&self, _display: u32, surface: u32) -> Option<(i32, i32)> {
        if !self.surfaces.contains(&surface) {
            return None;
        }
        self.surface_size
    }

    fn swap_buffers(&mut self, _display: u32, surface: u32) -> Result<(), String> {
        self.calls.push(EglCall::SwapBuffers(surface));
        if self.fails(EglFailure::SwapBuffers) {
            return Err("EGL_BAD_SURFACE".into());
        }
        Ok(())
    }

    fn destroy_surface(&mut self, _display: u32, surface: u32) {
        self.calls.push(EglCall::DestroySurface(surface));
        self.surfaces.remove(&surface);
    }

    fn destroy_context(&mut self, _display: u32, context: u32) {
        self.calls.push(EglCall::DestroyContext(context));
        self.contexts.remove(&context);
    }
}

// ── GL ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MockLocation(pub u32);

/// Recorded GL state changes, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader(ShaderStage),
    DeleteShader(u32),
    CreateProgram,
    DeleteProgram(u32),
    CreateBuffer,
    DeleteBuffer(u32),
    UseProgram(Option<u32>),
    Uniform4f(MockLocation, [f32; 4]),
    Viewport(ViewportRect),
    ClearColor([f32; 4]),
    Clear,
    AttribBuffer { location: u32, buffer: u32, components: i32 },
    DrawArrays(Topology, i32, i32),
}

#[derive(Debug)]
struct MockShader {
    stage: ShaderStage,
    source: Option<String>,
}

#[derive(Debug, Clone)]
struct MockUniform {
    var: ActiveVariable,
    block: Option<(u32, i32)>,
}

fn vec4(name: &str) -> ActiveVariable {
    ActiveVariable {
        name: name.to_string(),
        size: 1,
        gl_type: glow::FLOAT_VEC4,
    }
}

#[derive(Debug)]
pub struct MockGl {
    next_handle: u32,
    shaders: BTreeMap<u32, MockShader>,
    shaders_created: usize,
    programs: BTreeMap<u32, Vec<u32>>,
    buffers: BTreeMap<u32, Vec<u8>>,
    block_bindings: BTreeMap<(u32, u32), u32>,
    uniform_buffers: BTreeMap<u32, u32>,

    attributes: Vec<(ActiveVariable, u32)>,
    uniforms: Vec<MockUniform>,
    blocks: Vec<(String, i32)>,

    compile_failure: Option<(ShaderStage, String)>,
    link_failure: Option<String>,
    fail_shader_creation: bool,
    fail_buffer_creation: bool,

    calls: Vec<GlCall>,
}

/// Reflects the builtin triangle program.
impl Default for MockGl {
    fn default() -> Self {
        Self {
            next_handle: 0,
            shaders: BTreeMap::new(),
            shaders_created: 0,
            programs: BTreeMap::new(),
            buffers: BTreeMap::new(),
            block_bindings: BTreeMap::new(),
            uniform_buffers: BTreeMap::new(),
            attributes: vec![(vec4("vPosition"), 0), (vec4("vColor"), 15)],
            uniforms: vec![
                MockUniform {
                    var: vec4("test"),
                    block: None,
                },
                MockUniform {
                    var: vec4("status"),
                    block: Some((0, 0)),
                },
            ],
            blocks: vec![("block".to_string(), 16)],
            compile_failure: None,
            link_failure: None,
            fail_shader_creation: false,
            fail_buffer_creation: false,
            calls: Vec::new(),
        }
    }
}

impl MockGl {
    pub fn failing_compile(mut self, stage: ShaderStage, log: &str) -> Self {
        self.compile_failure = Some((stage, log.to_string()));
        self
    }

    pub fn failing_link(mut self, log: &str) -> Self {
        self.link_failure = Some(log.to_string());
        self
    }

    pub fn failing_shader_creation(mut self) -> Self {
        self.fail_shader_creation = true;
        self
    }

    pub fn failing_buffer_creation(mut self) -> Self {
        self.fail_buffer_creation = true;
        self
    }

    pub fn without_attribute(mut self, name: &str) -> Self {
        self.attributes.retain(|(var, _)| var.name != name);
        self
    }

    pub fn without_uniform(mut self, name: &str) -> Self {
        self.uniforms.retain(|u| u.var.name != name);
        self
    }

    pub fn without_uniform_block(mut self) -> Self {
        self.uniforms.retain(|u| u.block.is_none());
        self.blocks.clear();
        self
    }

    /// Creates a program that reports a successful link.
    pub fn linked_program(&mut self) -> u32 {
        let program = self.handle();
        self.programs.insert(program, Vec::new());
        program
    }

    pub fn is_live_shader(&self, shader: u32) -> bool {
        self.shaders.contains_key(&shader)
    }

    pub fn shader_source_of(&self, shader: u32) -> Option<String> {
        self.shaders.get(&shader).and_then(|s| s.source.clone())
    }

    pub fn shaders_created(&self) -> usize {
        self.shaders_created
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn attached_to(&self, program: u32) -> Vec<u32> {
        self.programs.get(&program).cloned().unwrap_or_default()
    }

    pub fn block_binding(&self, program: u32, block: u32) -> Option<u32> {
        self.block_bindings.get(&(program, block)).copied()
    }

    pub fn bound_uniform_buffer(&self, binding: u32) -> Option<u32> {
        self.uniform_buffers.get(&binding).copied()
    }

    pub fn buffer_contents(&self, buffer: u32) -> Option<&[u8]> {
        self.buffers.get(&buffer).map(Vec::as_slice)
    }

    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl GlApi for MockGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = MockLocation;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32, String> {
        self.calls.push(GlCall::CreateShader(stage));
        if self.fail_shader_creation {
            return Err("GL_OUT_OF_MEMORY".into());
        }
        let shader = self.handle();
        self.shaders.insert(
            shader,
            MockShader {
                stage,
                source: None,
            },
        );
        self.shaders_created += 1;
        Ok(shader)
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader) {
            s.source = Some(source.to_string());
        }
    }

    fn compile_shader(&mut self, _shader: u32) {}

    fn shader_compile_status(&self, shader: u32) -> bool {
        match (&self.compile_failure, self.shaders.get(&shader)) {
            (Some((stage, _)), Some(s)) => s.stage != *stage,
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        self.compile_failure
            .as_ref()
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: u32) {
        self.calls.push(GlCall::DeleteShader(shader));
        self.shaders.remove(&shader);
    }

    fn create_program(&mut self) -> Result<u32, String> {
        self.calls.push(GlCall::CreateProgram);
        let program = self.handle();
        self.programs.insert(program, Vec::new());
        Ok(program)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        if let Some(attached) = self.programs.get_mut(&program) {
            attached.push(shader);
        }
    }

    fn link_program(&mut self, _program: u32) {}

    fn program_link_status(&self, program: u32) -> bool {
        self.link_failure.is_none() && self.programs.contains_key(&program)
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.link_failure.clone().unwrap_or_default()
    }

    fn delete_program(&mut self, program: u32) {
        self.calls.push(GlCall::DeleteProgram(program));
        self.programs.remove(&program);
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn active_attribute_count(&self, _program: u32) -> u32 {
        self.attributes.len() as u32
    }

    fn active_attribute(&self, _program: u32, index: u32) -> Option<ActiveVariable> {
        self.attributes
            .get(index as usize)
            .map(|(var, _)| var.clone())
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .find(|(var, _)| var.name == name)
            .map(|(_, location)| *location)
    }

    fn active_uniform_count(&self, _program: u32) -> u32 {
        self.uniforms.len() as u32
    }

    fn active_uniform(&self, _program: u32, index: u32) -> Option<ActiveVariable> {
        self.uniforms.get(index as usize).map(|u| u.var.clone())
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<MockLocation> {
        self.uniforms
            .iter()
            .position(|u| u.var.name == name && u.block.is_none())
            .map(|i| MockLocation(i as u32))
    }

    fn uniform_block_member(&self, _program: u32, index: u32) -> Option<(u32, i32)> {
        self.uniforms.get(index as usize).and_then(|u| u.block)
    }

    fn uniform_block_name(&self, _program: u32, block: u32) -> String {
        self.blocks
            .get(block as usize)
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    }

    fn uniform_block_data_size(&self, _program: u32, block: u32) -> i32 {
        self.blocks
            .get(block as usize)
            .map(|(_, size)| *size)
            .unwrap_or(0)
    }

    fn uniform_block_binding(&mut self, program: u32, block: u32, binding: u32) {
        self.block_bindings.insert((program, block), binding);
    }

    fn create_buffer(&mut self) -> Result<u32, String> {
        self.calls.push(GlCall::CreateBuffer);
        if self.fail_buffer_creation {
            return Err("GL_OUT_OF_MEMORY".into());
        }
        let buffer = self.handle();
        self.buffers.insert(buffer, Vec::new());
        Ok(buffer)
    }

    fn upload_buffer(&mut self, _target: BufferTarget, buffer: u32, data: &[u8]) {
        if let Some(contents) = self.buffers.get_mut(&buffer) {
            *contents = data.to_vec();
        }
    }

    fn bind_uniform_buffer_base(&mut self, binding: u32, buffer: u32) {
        self.uniform_buffers.insert(binding, buffer);
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.calls.push(GlCall::DeleteBuffer(buffer));
        self.buffers.remove(&buffer);
        self.uniform_buffers.retain(|_, b| *b != buffer);
    }

    fn limit(&self, _limit: GlLimit) -> i32 {
        16
    }

    fn set_uniform_vec4(&mut self, location: &MockLocation, value: [f32; 4]) {
        self.calls.push(GlCall::Uniform4f(*location, value));
    }

    fn viewport(&mut self, rect: ViewportRect) {
        self.calls.push(GlCall::Viewport(rect));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(GlCall::ClearColor(rgba));
    }

    fn clear_color_buffer(&mut self) {
        self.calls.push(GlCall::Clear);
    }

    fn vertex_attrib_buffer(&mut self, location: u32, buffer: u32, components: i32, _stride: i32) {
        self.calls.push(GlCall::AttribBuffer {
            location,
            buffer,
            components,
        });
    }

    fn draw_arrays(&mut self, topology: Topology, first: i32, count: i32) {
        self.calls.push(GlCall::DrawArrays(topology, first, count));
    }
}

// ── host events ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum Scripted {
    Command(LifecycleCommand<MockWindow>),
    Input,
}

/// Event source replaying one batch per poll.
///
/// An empty queue polls as "nothing pending".
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<Scripted>>,
    input_replies: Vec<InputStatus>,
    delivered: usize,
}

impl ScriptedEvents {
    pub fn new(batches: Vec<Vec<Scripted>>) -> Self {
        Self {
            batches: batches.into(),
            ..Self::default()
        }
    }

    pub fn input_replies(&self) -> &[InputStatus] {
        &self.input_replies
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl EventSource for ScriptedEvents {
    type Window = MockWindow;

    fn poll(&mut self, sink: &mut dyn EventSink<MockWindow>) {
        let Some(batch) = self.batches.pop_front() else {
            return;
        };
        for event in batch {
            self.delivered += 1;
            match event {
                Scripted::Command(command) => {
                    if sink.on_lifecycle(command) == LoopControl::Exit {
                        return;
                    }
                }
                Scripted::Input => self.input_replies.push(sink.on_input()),
            }
        }
    }
}
