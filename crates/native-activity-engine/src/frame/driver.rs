use crate::device::EglApi;
use crate::gl::{GlApi, Topology};
use crate::lifecycle::{EventSink, EventSource, InputStatus, Lifecycle, LifecycleCommand, LoopControl};

use super::config::FrameConfig;

/// Forwards host events to the lifecycle until it asks to exit.
struct Dispatch<'a, E: EglApi, G: GlApi> {
    lifecycle: &'a mut Lifecycle<E, G>,
    control: LoopControl,
}

impl<E: EglApi, G: GlApi> EventSink<E::Window> for Dispatch<'_, E, G> {
    fn on_lifecycle(&mut self, command: LifecycleCommand<E::Window>) -> LoopControl {
        if self.control == LoopControl::Exit {
            return LoopControl::Exit;
        }
        self.control = self.lifecycle.handle(command);
        self.control
    }

    fn on_input(&mut self) -> InputStatus {
        log::trace!("input event not consumed");
        InputStatus::NotConsumed
    }
}

/// Main loop: drain pending events, then draw one frame if ready.
pub struct FrameDriver<E: EglApi, G: GlApi> {
    lifecycle: Lifecycle<E, G>,
    config: FrameConfig,
    frames_drawn: u64,
    exit_requested: bool,
}

impl<E: EglApi, G: GlApi> FrameDriver<E, G> {
    pub fn new(lifecycle: Lifecycle<E, G>, config: FrameConfig) -> Self {
        Self {
            lifecycle,
            config,
            frames_drawn: 0,
            exit_requested: false,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle<E, G> {
        &self.lifecycle
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// One loop iteration.
    ///
    /// Returns `Exit` once the host has asked to destroy the activity; no
    /// frame is drawn in that iteration or any later one.
    pub fn iterate<S>(&mut self, source: &mut S) -> LoopControl
    where
        S: EventSource<Window = E::Window>,
    {
        if self.exit_requested {
            return LoopControl::Exit;
        }

        let mut dispatch = Dispatch {
            lifecycle: &mut self.lifecycle,
            control: LoopControl::Continue,
        };
        source.poll(&mut dispatch);

        if dispatch.control == LoopControl::Exit {
            self.exit_requested = true;
            log::info!("destroy requested; leaving frame loop after {} frame(s)", self.frames_drawn);
            return LoopControl::Exit;
        }

        self.draw_frame();
        LoopControl::Continue
    }

    /// Iterates until exit, then releases whatever context is still live.
    pub fn run<S>(&mut self, source: &mut S)
    where
        S: EventSource<Window = E::Window>,
    {
        while self.iterate(source) == LoopControl::Continue {}
        self.lifecycle.shutdown();
    }

    /// Draws and presents one frame. Returns `false` when not ready.
    ///
    /// A failed present is logged and the loop carries on.
    pub fn draw_frame(&mut self) -> bool {
        let Some((device, gl, context)) = self.lifecycle.render_parts() else {
            return false;
        };

        gl.use_program(Some(context.program().program()));
        if let Some(location) = context.frame_uniform() {
            gl.set_uniform_vec4(location, self.config.frame_uniform_value);
        }
        gl.viewport(self.config.viewport.resolve(context.surface_size()));
        gl.clear_color(self.config.clear_color);
        gl.clear_color_buffer();

        let geometry = context.geometry();
        geometry.bind(gl);
        gl.draw_arrays(Topology::TriangleFan, 0, geometry.vertex_count());

        if let Err(e) = device.present(context.target()) {
            log::error!("{e}");
        }

        self.frames_drawn += 1;
        true
    }
}
