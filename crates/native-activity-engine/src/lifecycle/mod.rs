//! Window lifecycle: host events and the resource state machine.

mod config;
mod event;
mod machine;

pub use config::SceneConfig;
pub use event::{EventSink, EventSource, InputStatus, LifecycleCommand, LoopControl};
pub use machine::{GraphicsContext, Lifecycle, LifecycleState};
