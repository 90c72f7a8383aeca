use std::ffi::c_void;

use khronos_egl as egl;
use ndk::native_window::NativeWindow;

use super::egl::{ConfigAttrib, DisplayString, EglApi};
use super::init::ConfigRequirements;

/// `EglApi` over the system `libEGL`.
pub struct KhronosEgl {
    egl: egl::Instance<egl::Static>,
}

impl KhronosEgl {
    pub fn new() -> Self {
        Self {
            egl: egl::Instance::new(egl::Static),
        }
    }

    /// Resolves a client API entry point; null when unavailable.
    pub fn proc_address(&self, name: &str) -> *const c_void {
        self.egl
            .get_proc_address(name)
            .map_or(std::ptr::null(), |f| f as *const c_void)
    }
}

impl Default for KhronosEgl {
    fn default() -> Self {
        Self::new()
    }
}

fn attrib_enum(attrib: ConfigAttrib) -> egl::Int {
    match attrib {
        ConfigAttrib::BufferSize => egl::BUFFER_SIZE,
        ConfigAttrib::RedSize => egl::RED_SIZE,
        ConfigAttrib::GreenSize => egl::GREEN_SIZE,
        ConfigAttrib::BlueSize => egl::BLUE_SIZE,
        ConfigAttrib::AlphaSize => egl::ALPHA_SIZE,
        ConfigAttrib::DepthSize => egl::DEPTH_SIZE,
        ConfigAttrib::SurfaceType => egl::SURFACE_TYPE,
        ConfigAttrib::NativeVisualId => egl::NATIVE_VISUAL_ID,
    }
}

fn string_enum(which: DisplayString) -> egl::Int {
    match which {
        DisplayString::Version => egl::VERSION,
        DisplayString::Vendor => egl::VENDOR,
        DisplayString::Extensions => egl::EXTENSIONS,
        DisplayString::ClientApis => egl::CLIENT_APIS,
    }
}

impl EglApi for KhronosEgl {
    type Display = egl::Display;
    type Config = egl::Config;
    type Surface = egl::Surface;
    type Context = egl::Context;
    type Window = NativeWindow;

    fn default_display(&mut self) -> Option<Self::Display> {
        unsafe { self.egl.get_display(egl::DEFAULT_DISPLAY) }
    }

    fn initialize(&mut self, display: Self::Display) -> Result<(i32, i32), String> {
        self.egl.initialize(display).map_err(|e| e.to_string())
    }

    fn query_string(&self, display: Self::Display, which: DisplayString) -> Option<String> {
        self.egl
            .query_string(Some(display), string_enum(which))
            .ok()
            .map(|s| s.to_string_lossy().into_owned())
    }

    fn configs(&self, display: Self::Display) -> Result<Vec<Self::Config>, String> {
        let count = self
            .egl
            .get_config_count(display)
            .map_err(|e| e.to_string())?;
        let mut configs = Vec::with_capacity(count);
        self.egl
            .get_configs(display, &mut configs)
            .map_err(|e| e.to_string())?;
        Ok(configs)
    }

    fn config_attrib(
        &self,
        display: Self::Display,
        config: Self::Config,
        attrib: ConfigAttrib,
    ) -> Option<i32> {
        self.egl
            .get_config_attrib(display, config, attrib_enum(attrib))
            .ok()
    }

    fn choose_config(
        &self,
        display: Self::Display,
        requirements: &ConfigRequirements,
    ) -> Result<Option<Self::Config>, String> {
        let mut attribs: Vec<egl::Int> = requirements
            .attributes()
            .into_iter()
            .flat_map(|(a, v)| [attrib_enum(a), v])
            .collect();
        attribs.push(egl::NONE);

        self.egl
            .choose_first_config(display, &attribs)
            .map_err(|e| e.to_string())
    }

    fn set_window_format(&mut self, window: &Self::Window, native_visual_id: i32) {
        let status = unsafe {
            ndk_sys::ANativeWindow_setBuffersGeometry(window.ptr().as_ptr(), 0, 0, native_visual_id)
        };
        if status != 0 {
            log::warn!("ANativeWindow_setBuffersGeometry({native_visual_id}) returned {status}");
        }
    }

    fn create_window_surface(
        &mut self,
        display: Self::Display,
        config: Self::Config,
        window: &Self::Window,
    ) -> Result<Self::Surface, String> {
        unsafe {
            self.egl.create_window_surface(
                display,
                config,
                window.ptr().as_ptr() as egl::NativeWindowType,
                None,
            )
        }
        .map_err(|e| e.to_string())
    }

    fn create_context(
        &mut self,
        display: Self::Display,
        config: Self::Config,
        client_version: i32,
    ) -> Result<Self::Context, String> {
        let attribs = [egl::CONTEXT_CLIENT_VERSION, client_version, egl::NONE];
        self.egl
            .create_context(display, config, None, &attribs)
            .map_err(|e| e.to_string())
    }

    fn make_current(
        &mut self,
        display: Self::Display,
        target: Option<(Self::Surface, Self::Context)>,
    ) -> Result<(), String> {
        let result = match target {
            Some((surface, context)) => {
                self.egl
                    .make_current(display, Some(surface), Some(surface), Some(context))
            }
            None => self.egl.make_current(display, None, None, None),
        };
        result.map_err(|e| e.to_string())
    }

    fn surface_size(&self, display: Self::Display, surface: Self::Surface) -> Option<(i32, i32)> {
        let width = self.egl.query_surface(display, surface, egl::WIDTH).ok()?;
        let height = self.egl.query_surface(display, surface, egl::HEIGHT).ok()?;
        Some((width, height))
    }

    fn swap_buffers(
        &mut self,
        display: Self::Display,
        surface: Self::Surface,
    ) -> Result<(), String> {
        self.egl
            .swap_buffers(display, surface)
            .map_err(|e| e.to_string())
    }

    fn destroy_surface(&mut self, display: Self::Display, surface: Self::Surface) {
        if let Err(e) = self.egl.destroy_surface(display, surface) {
            log::warn!("eglDestroySurface failed: {e}");
        }
    }

    fn destroy_context(&mut self, display: Self::Display, context: Self::Context) {
        if let Err(e) = self.egl.destroy_context(display, context) {
            log::warn!("eglDestroyContext failed: {e}");
        }
    }
}
