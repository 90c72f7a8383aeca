/// Control directive returned by event handlers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Answer given to the host for a raw input event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputStatus {
    Consumed,
    NotConsumed,
}

/// Platform lifecycle command, carrying the native window where one is handed over.
#[derive(Debug)]
pub enum LifecycleCommand<W> {
    InitWindow(W),
    TerminateWindow,
    WindowResized,
    RedrawNeeded,
    ContentRectChanged,
    GainedFocus,
    LostFocus,
    ConfigChanged,
    LowMemory,
    Start,
    Resume,
    SaveState,
    Pause,
    Stop,
    Destroy,
}

impl<W> LifecycleCommand<W> {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleCommand::InitWindow(_) => "APP_CMD_INIT_WINDOW",
            LifecycleCommand::TerminateWindow => "APP_CMD_TERM_WINDOW",
            LifecycleCommand::WindowResized => "APP_CMD_WINDOW_RESIZED",
            LifecycleCommand::RedrawNeeded => "APP_CMD_WINDOW_REDRAW_NEEDED",
            LifecycleCommand::ContentRectChanged => "APP_CMD_CONTENT_RECT_CHANGED",
            LifecycleCommand::GainedFocus => "APP_CMD_GAINED_FOCUS",
            LifecycleCommand::LostFocus => "APP_CMD_LOST_FOCUS",
            LifecycleCommand::ConfigChanged => "APP_CMD_CONFIG_CHANGED",
            LifecycleCommand::LowMemory => "APP_CMD_LOW_MEMORY",
            LifecycleCommand::Start => "APP_CMD_START",
            LifecycleCommand::Resume => "APP_CMD_RESUME",
            LifecycleCommand::SaveState => "APP_CMD_SAVE_STATE",
            LifecycleCommand::Pause => "APP_CMD_PAUSE",
            LifecycleCommand::Stop => "APP_CMD_STOP",
            LifecycleCommand::Destroy => "APP_CMD_DESTROY",
        }
    }
}

/// Receiver of host events.
pub trait EventSink<W> {
    /// Called for each lifecycle command, in delivery order.
    fn on_lifecycle(&mut self, command: LifecycleCommand<W>) -> LoopControl;

    /// Called for each raw input event.
    fn on_input(&mut self) -> InputStatus {
        InputStatus::NotConsumed
    }
}

/// Non-blocking host event pump.
pub trait EventSource {
    type Window;

    /// Delivers every immediately available event to `sink` and returns.
    ///
    /// Must not block when nothing is pending. Once `sink` answers
    /// `LoopControl::Exit`, no further events are delivered in this call.
    fn poll(&mut self, sink: &mut dyn EventSink<Self::Window>);
}
