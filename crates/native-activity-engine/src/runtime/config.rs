use anyhow::{Result, ensure};

use crate::device::EglInit;
use crate::frame::FrameConfig;
use crate::lifecycle::SceneConfig;

/// Everything the runtime needs besides the host handle.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub egl: EglInit,
    pub scene: SceneConfig,
    pub frame: FrameConfig,
}

impl RuntimeConfig {
    /// Rejects combinations that can never produce a ready context.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.egl.client_version >= 3,
            "a GLES {} context cannot run `#version 300 es` shaders",
            self.egl.client_version
        );
        ensure!(
            !self.scene.frame_uniform.is_empty(),
            "per-frame uniform name is empty"
        );
        Ok(())
    }
}
