use crate::device::{Device, EglApi, InitError, WindowTarget};
use crate::gl::{GlApi, GlLimit};
use crate::scene::Geometry;
use crate::shader::ShaderProgram;
use crate::uniform::{UniformBuffer, pack};

use super::config::SceneConfig;
use super::event::{LifecycleCommand, LoopControl};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    /// No surface, context or GL objects exist.
    Uninitialized,
    /// Everything needed to draw is live and current.
    Ready,
    /// Releasing resources; only observable from inside teardown.
    TearingDown,
}

/// Every resource tied to one native window.
///
/// Exists only while the lifecycle is `Ready`.
pub struct GraphicsContext<E: EglApi, G: GlApi> {
    window: E::Window,
    target: WindowTarget<E>,
    program: ShaderProgram<G>,
    geometry: Geometry<G>,
    uniforms: Option<UniformBuffer<G>>,
    frame_uniform: Option<G::UniformLocation>,
    surface_size: (i32, i32),
}

impl<E: EglApi, G: GlApi> GraphicsContext<E, G> {
    pub fn window(&self) -> &E::Window {
        &self.window
    }

    pub fn target(&self) -> &WindowTarget<E> {
        &self.target
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn geometry(&self) -> &Geometry<G> {
        &self.geometry
    }

    /// `None` when the program has no active uniform block of the configured name.
    pub fn uniforms(&self) -> Option<&UniformBuffer<G>> {
        self.uniforms.as_ref()
    }

    /// `None` when the per-frame uniform is not active in the program.
    pub fn frame_uniform(&self) -> Option<&G::UniformLocation> {
        self.frame_uniform.as_ref()
    }

    /// Surface size read back at init (or after the last resize).
    pub fn surface_size(&self) -> (i32, i32) {
        self.surface_size
    }
}

struct SceneResources<G: GlApi> {
    program: ShaderProgram<G>,
    geometry: Geometry<G>,
    uniforms: Option<UniformBuffer<G>>,
}

/// Window-bound resource state machine.
///
/// Builds the full graphics context on window-init and releases it on
/// window-terminate. A failed init leaves nothing behind and is retried on the
/// next window-init.
pub struct Lifecycle<E: EglApi, G: GlApi> {
    device: Device<E>,
    gl: G,
    scene: SceneConfig,
    context: Option<GraphicsContext<E, G>>,
    state: LifecycleState,
}

impl<E: EglApi, G: GlApi> Lifecycle<E, G> {
    pub fn new(device: Device<E>, gl: G, scene: SceneConfig) -> Self {
        Self {
            device,
            gl,
            scene,
            context: None,
            state: LifecycleState::Uninitialized,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    pub fn device(&self) -> &Device<E> {
        &self.device
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn context(&self) -> Option<&GraphicsContext<E, G>> {
        self.context.as_ref()
    }

    /// Applies one lifecycle command. Returns `Exit` only for `Destroy`.
    pub fn handle(&mut self, command: LifecycleCommand<E::Window>) -> LoopControl {
        log::info!("{}", command.name());

        match command {
            LifecycleCommand::InitWindow(window) => self.init_window(window),
            LifecycleCommand::TerminateWindow => self.terminate_window(),
            LifecycleCommand::WindowResized | LifecycleCommand::ContentRectChanged => {
                self.refresh_dimensions()
            }
            LifecycleCommand::Destroy => return LoopControl::Exit,
            _ => {}
        }

        LoopControl::Continue
    }

    /// Releases any live context. Safe to call in any state.
    pub fn shutdown(&mut self) {
        self.terminate_window();
    }

    /// Split borrow used by the frame driver.
    pub(crate) fn render_parts(
        &mut self,
    ) -> Option<(&mut Device<E>, &mut G, &GraphicsContext<E, G>)> {
        let context = self.context.as_ref()?;
        Some((&mut self.device, &mut self.gl, context))
    }

    fn init_window(&mut self, window: E::Window) {
        if self.context.is_some() {
            log::warn!("window-init while a context is live; rebuilding");
            self.terminate_window();
        }

        match self.build(window) {
            Ok(context) => {
                self.context = Some(context);
                self.state = LifecycleState::Ready;
                log::info!("graphics context ready");
            }
            Err(e) => {
                self.state = LifecycleState::Uninitialized;
                log::error!("window init failed: {e}");
            }
        }
    }

    fn build(&mut self, window: E::Window) -> Result<GraphicsContext<E, G>, InitError> {
        let target = self.device.initialize(&window)?;
        log_limits(&self.gl);

        let SceneResources {
            program,
            geometry,
            uniforms,
        } = match self.build_resources() {
            Ok(resources) => resources,
            Err(e) => {
                self.device.teardown(Some(target));
                return Err(e);
            }
        };

        let frame_uniform = program
            .reflection()
            .uniform(&self.scene.frame_uniform)
            .and_then(|u| u.location.clone());
        if frame_uniform.is_none() {
            log::warn!(
                "uniform `{}` is not active; frames will not set it",
                self.scene.frame_uniform
            );
        }

        let surface_size = self.device.query_dimensions(&target);

        Ok(GraphicsContext {
            window,
            target,
            program,
            geometry,
            uniforms,
            frame_uniform,
            surface_size,
        })
    }

    /// Everything created here is deleted again if a later step fails.
    fn build_resources(&mut self) -> Result<SceneResources<G>, InitError> {
        let program = ShaderProgram::build(&mut self.gl, &self.scene.sources)?;

        let geometry = match Geometry::upload(&mut self.gl, program.reflection()) {
            Ok(geometry) => geometry,
            Err(e) => {
                program.destroy(&mut self.gl);
                return Err(e);
            }
        };

        match self.upload_uniforms(&program) {
            Ok(uniforms) => Ok(SceneResources {
                program,
                geometry,
                uniforms,
            }),
            Err(e) => {
                geometry.destroy(&mut self.gl);
                program.destroy(&mut self.gl);
                Err(e)
            }
        }
    }

    fn upload_uniforms(
        &mut self,
        program: &ShaderProgram<G>,
    ) -> Result<Option<UniformBuffer<G>>, InitError> {
        let Some(layout) = program.reflection().block(&self.scene.uniform_block) else {
            log::warn!(
                "uniform block `{}` is not active; skipping upload",
                self.scene.uniform_block
            );
            return Ok(None);
        };

        let fields: Vec<(&str, &[u8])> = self
            .scene
            .block_fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes()))
            .collect();
        let data = pack(layout, &fields)?;

        UniformBuffer::upload(&mut self.gl, program.program(), layout, &data).map(Some)
    }

    fn terminate_window(&mut self) {
        let Some(context) = self.context.take() else {
            log::debug!("no graphics context to release");
            return;
        };
        self.state = LifecycleState::TearingDown;

        let GraphicsContext {
            window,
            target,
            program,
            geometry,
            uniforms,
            ..
        } = context;

        // GL objects go first; they need the context current.
        geometry.destroy(&mut self.gl);
        if let Some(uniforms) = uniforms {
            uniforms.destroy(&mut self.gl);
        }
        program.destroy(&mut self.gl);
        self.device.teardown(Some(target));
        drop(window);

        self.state = LifecycleState::Uninitialized;
        log::info!("graphics context released");
    }

    fn refresh_dimensions(&mut self) {
        if let Some(context) = self.context.as_mut() {
            context.surface_size = self.device.query_dimensions(&context.target);
        }
    }
}

fn log_limits<G: GlApi>(gl: &G) {
    for limit in GlLimit::ALL {
        log::info!("{}: {}", limit.label(), gl.limit(limit));
    }
}
