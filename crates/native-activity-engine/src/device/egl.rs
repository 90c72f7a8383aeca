use std::fmt;

use super::init::ConfigRequirements;

/// Display query strings logged after `eglInitialize`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DisplayString {
    Version,
    Vendor,
    Extensions,
    ClientApis,
}

impl DisplayString {
    pub const ALL: [DisplayString; 4] = [
        DisplayString::Version,
        DisplayString::Vendor,
        DisplayString::Extensions,
        DisplayString::ClientApis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayString::Version => "EGL_VERSION",
            DisplayString::Vendor => "EGL_VENDOR",
            DisplayString::Extensions => "EGL_EXTENSIONS",
            DisplayString::ClientApis => "EGL_CLIENT_APIS",
        }
    }
}

/// Config attributes read back from the driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigAttrib {
    BufferSize,
    RedSize,
    GreenSize,
    BlueSize,
    AlphaSize,
    DepthSize,
    SurfaceType,
    NativeVisualId,
}

impl ConfigAttrib {
    /// Attributes dumped per config during enumeration.
    pub const ENUMERATED: [ConfigAttrib; 7] = [
        ConfigAttrib::BufferSize,
        ConfigAttrib::RedSize,
        ConfigAttrib::GreenSize,
        ConfigAttrib::BlueSize,
        ConfigAttrib::AlphaSize,
        ConfigAttrib::DepthSize,
        ConfigAttrib::SurfaceType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConfigAttrib::BufferSize => "EGL_BUFFER_SIZE",
            ConfigAttrib::RedSize => "EGL_RED_SIZE",
            ConfigAttrib::GreenSize => "EGL_GREEN_SIZE",
            ConfigAttrib::BlueSize => "EGL_BLUE_SIZE",
            ConfigAttrib::AlphaSize => "EGL_ALPHA_SIZE",
            ConfigAttrib::DepthSize => "EGL_DEPTH_SIZE",
            ConfigAttrib::SurfaceType => "EGL_SURFACE_TYPE",
            ConfigAttrib::NativeVisualId => "EGL_NATIVE_VISUAL_ID",
        }
    }
}

/// `EGL_WINDOW_BIT` in the `EGL_SURFACE_TYPE` mask.
pub const WINDOW_BIT: i32 = 0x0004;

/// The EGL 1.4 calls this program issues.
///
/// Failures carry the driver's error text; the device layer maps them onto
/// `InitError` variants.
pub trait EglApi {
    type Display: Copy + Eq + fmt::Debug;
    type Config: Copy + Eq + fmt::Debug;
    type Surface: Copy + Eq + fmt::Debug;
    type Context: Copy + Eq + fmt::Debug;
    /// Native window the surface is bound to.
    type Window;

    fn default_display(&mut self) -> Option<Self::Display>;
    /// Returns the `(major, minor)` EGL version.
    fn initialize(&mut self, display: Self::Display) -> Result<(i32, i32), String>;
    fn query_string(&self, display: Self::Display, which: DisplayString) -> Option<String>;
    fn configs(&self, display: Self::Display) -> Result<Vec<Self::Config>, String>;
    fn config_attrib(
        &self,
        display: Self::Display,
        config: Self::Config,
        attrib: ConfigAttrib,
    ) -> Option<i32>;
    /// First config satisfying `requirements`, in driver preference order.
    fn choose_config(
        &self,
        display: Self::Display,
        requirements: &ConfigRequirements,
    ) -> Result<Option<Self::Config>, String>;

    /// Applies the config's native visual id as the window buffer format.
    fn set_window_format(&mut self, window: &Self::Window, native_visual_id: i32);
    fn create_window_surface(
        &mut self,
        display: Self::Display,
        config: Self::Config,
        window: &Self::Window,
    ) -> Result<Self::Surface, String>;
    fn create_context(
        &mut self,
        display: Self::Display,
        config: Self::Config,
        client_version: i32,
    ) -> Result<Self::Context, String>;
    /// `None` releases whatever is current on this thread.
    fn make_current(
        &mut self,
        display: Self::Display,
        target: Option<(Self::Surface, Self::Context)>,
    ) -> Result<(), String>;
    fn surface_size(&self, display: Self::Display, surface: Self::Surface) -> Option<(i32, i32)>;
    fn swap_buffers(&mut self, display: Self::Display, surface: Self::Surface)
    -> Result<(), String>;
    fn destroy_surface(&mut self, display: Self::Display, surface: Self::Surface);
    fn destroy_context(&mut self, display: Self::Display, context: Self::Context);
}
