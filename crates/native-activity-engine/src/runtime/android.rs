use std::time::Duration;

use android_activity::{AndroidApp, InputStatus as HostInputStatus, MainEvent, PollEvent};
use anyhow::{Context, Result};
use ndk::native_window::NativeWindow;

use crate::device::{Device, KhronosEgl};
use crate::frame::FrameDriver;
use crate::gl::GlowGl;
use crate::lifecycle::{EventSink, EventSource, InputStatus, Lifecycle, LifecycleCommand, LoopControl};

use super::config::RuntimeConfig;

/// `EventSource` over the activity's looper.
pub struct AndroidEvents {
    app: AndroidApp,
}

impl AndroidEvents {
    pub fn new(app: AndroidApp) -> Self {
        Self { app }
    }
}

impl EventSource for AndroidEvents {
    type Window = NativeWindow;

    fn poll(&mut self, sink: &mut dyn EventSink<NativeWindow>) {
        let app = &self.app;
        let mut exit = false;

        loop {
            let mut delivered = false;
            let mut input_pending = false;

            app.poll_events(Some(Duration::ZERO), |event| {
                let PollEvent::Main(event) = event else {
                    return;
                };
                delivered = true;
                if exit {
                    return;
                }
                if let MainEvent::InputAvailable = event {
                    input_pending = true;
                    return;
                }
                if let Some(command) = translate(app, event) {
                    exit = sink.on_lifecycle(command) == LoopControl::Exit;
                }
            });

            if input_pending && !exit {
                drain_input(app, sink);
            }
            if exit || !delivered {
                break;
            }
        }
    }
}

fn translate(app: &AndroidApp, event: MainEvent<'_>) -> Option<LifecycleCommand<NativeWindow>> {
    let command = match event {
        MainEvent::InitWindow { .. } => match app.native_window() {
            Some(window) => LifecycleCommand::InitWindow(window),
            None => {
                log::warn!("APP_CMD_INIT_WINDOW without a native window");
                return None;
            }
        },
        MainEvent::TerminateWindow { .. } => LifecycleCommand::TerminateWindow,
        MainEvent::WindowResized { .. } => LifecycleCommand::WindowResized,
        MainEvent::RedrawNeeded { .. } => LifecycleCommand::RedrawNeeded,
        MainEvent::ContentRectChanged { .. } => LifecycleCommand::ContentRectChanged,
        MainEvent::GainedFocus => LifecycleCommand::GainedFocus,
        MainEvent::LostFocus => LifecycleCommand::LostFocus,
        MainEvent::ConfigChanged { .. } => LifecycleCommand::ConfigChanged,
        MainEvent::LowMemory => LifecycleCommand::LowMemory,
        MainEvent::Start => LifecycleCommand::Start,
        MainEvent::Resume { .. } => LifecycleCommand::Resume,
        MainEvent::SaveState { .. } => LifecycleCommand::SaveState,
        MainEvent::Pause => LifecycleCommand::Pause,
        MainEvent::Stop => LifecycleCommand::Stop,
        MainEvent::Destroy => LifecycleCommand::Destroy,
        other => {
            log::debug!("unhandled main event: {other:?}");
            return None;
        }
    };
    Some(command)
}

fn drain_input(app: &AndroidApp, sink: &mut dyn EventSink<NativeWindow>) {
    let mut events = match app.input_events_iter() {
        Ok(events) => events,
        Err(e) => {
            log::warn!("input queue unavailable: {e}");
            return;
        }
    };

    while events.next(|_event| match sink.on_input() {
        InputStatus::Consumed => HostInputStatus::Handled,
        InputStatus::NotConsumed => HostInputStatus::Unhandled,
    }) {}
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the frame loop until the activity is destroyed.
    pub fn run(app: AndroidApp, config: RuntimeConfig) -> Result<()> {
        config.validate().context("invalid runtime configuration")?;

        let loader = KhronosEgl::new();
        // SAFETY: entry points come from the same libEGL that creates the
        // context, and `Lifecycle` only calls GL on this thread with it current.
        let gl = unsafe { GlowGl::from_loader(move |name| loader.proc_address(name)) };

        let device = Device::new(KhronosEgl::new(), config.egl);
        let lifecycle = Lifecycle::new(device, gl, config.scene);
        let mut driver = FrameDriver::new(lifecycle, config.frame);

        log::info!("entering frame loop");
        driver.run(&mut AndroidEvents::new(app));
        log::info!("frame loop finished after {} frame(s)", driver.frames_drawn());

        Ok(())
    }
}
