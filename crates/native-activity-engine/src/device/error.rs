use crate::shader::{CompileError, LinkError};
use crate::uniform::PackError;

/// Reasons a window-init cycle can fail.
///
/// Every variant is recoverable: the lifecycle logs it, releases whatever was
/// created during the attempt and waits for the next window-init.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("no EGL display available")]
    DisplayUnavailable,
    #[error("eglInitialize failed: {0}")]
    DisplayInitFailed(String),
    #[error("no EGL config satisfies the requirements: {0}")]
    ConfigSelectionFailed(String),
    #[error("eglCreateWindowSurface failed: {0}")]
    SurfaceCreationFailed(String),
    #[error("eglCreateContext failed: {0}")]
    ContextCreationFailed(String),
    #[error("eglMakeCurrent failed: {0}")]
    MakeCurrentFailed(String),
    #[error(transparent)]
    ShaderCompileFailed(#[from] CompileError),
    #[error(transparent)]
    ProgramLinkFailed(#[from] LinkError),
    #[error("vertex attribute `{0}` is not active in the linked program")]
    MissingAttribute(String),
    #[error("vertex attribute `{name}` takes at most {accepted} components, binding supplies {supplied}")]
    AttributeMismatch {
        name: String,
        accepted: i32,
        supplied: i32,
    },
    #[error("buffer creation failed: {0}")]
    BufferCreationFailed(String),
    #[error("uniform block packing failed: {0}")]
    UniformPack(#[from] PackError),
}

/// Failure presenting a frame (`eglSwapBuffers`).
#[derive(Debug, thiserror::Error)]
#[error("eglSwapBuffers failed: {0}")]
pub struct PresentError(pub String);
