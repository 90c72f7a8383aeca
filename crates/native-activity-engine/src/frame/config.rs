use crate::gl::ViewportRect;

/// How the per-frame viewport is chosen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewportMode {
    /// Always this rectangle, whatever the surface size.
    Fixed(ViewportRect),
    /// The whole surface as last queried.
    Surface,
}

impl ViewportMode {
    pub fn resolve(self, surface_size: (i32, i32)) -> ViewportRect {
        match self {
            ViewportMode::Fixed(rect) => rect,
            ViewportMode::Surface => ViewportRect::new(0, 0, surface_size.0, surface_size.1),
        }
    }
}

/// Per-frame draw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    pub viewport: ViewportMode,
    pub clear_color: [f32; 4],
    /// Value written to the per-frame uniform before each draw.
    pub frame_uniform_value: [f32; 4],
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportMode::Fixed(ViewportRect::new(360, 1000, 360, 540)),
            clear_color: [1.0, 0.0, 0.0, 0.0],
            frame_uniform_value: [0.5, 0.0, 0.0, 0.0],
        }
    }
}
