use std::fmt;

use super::egl::{ConfigAttrib, DisplayString, EglApi};
use super::error::{InitError, PresentError};
use super::init::EglInit;

/// Display connection and chosen config.
///
/// Acquired on the first successful window-init and kept for the rest of the
/// process; window recreation reuses it.
pub struct DisplayConnection<E: EglApi> {
    pub display: E::Display,
    pub config: E::Config,
}

impl<E: EglApi> Clone for DisplayConnection<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: EglApi> Copy for DisplayConnection<E> {}

impl<E: EglApi> fmt::Debug for DisplayConnection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayConnection")
            .field("display", &self.display)
            .field("config", &self.config)
            .finish()
    }
}

/// Surface + context bound to one native window.
///
/// Only `Device::initialize` creates these and only `Device::teardown`
/// destroys them.
pub struct WindowTarget<E: EglApi> {
    display: E::Display,
    config: E::Config,
    surface: E::Surface,
    context: E::Context,
}

impl<E: EglApi> WindowTarget<E> {
    pub fn display(&self) -> E::Display {
        self.display
    }

    pub fn config(&self) -> E::Config {
        self.config
    }

    pub fn surface(&self) -> E::Surface {
        self.surface
    }

    pub fn context(&self) -> E::Context {
        self.context
    }
}

impl<E: EglApi> fmt::Debug for WindowTarget<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowTarget")
            .field("display", &self.display)
            .field("config", &self.config)
            .field("surface", &self.surface)
            .field("context", &self.context)
            .finish()
    }
}

/// Owns the EGL backend and the retained display connection.
///
/// This type is the low-level surface/context manager:
/// - connects to and initializes the default display (once)
/// - selects a config matching `EglInit::requirements`
/// - creates and destroys window surfaces and contexts
/// - presents frames
pub struct Device<E: EglApi> {
    egl: E,
    init: EglInit,
    connection: Option<DisplayConnection<E>>,
}

impl<E: EglApi> Device<E> {
    pub fn new(egl: E, init: EglInit) -> Self {
        Self {
            egl,
            init,
            connection: None,
        }
    }

    /// Returns the EGL backend.
    pub fn egl(&self) -> &E {
        &self.egl
    }

    #[cfg(test)]
    pub(crate) fn egl_mut(&mut self) -> &mut E {
        &mut self.egl
    }

    /// Returns the retained display connection, if one was established.
    pub fn connection(&self) -> Option<DisplayConnection<E>> {
        self.connection
    }

    /// Creates a surface + context for `window` and makes them current.
    ///
    /// On failure every handle created by this call has been released; the
    /// retained display connection (if any) is kept.
    pub fn initialize(&mut self, window: &E::Window) -> Result<WindowTarget<E>, InitError> {
        let DisplayConnection { display, config } = match self.connection {
            Some(conn) => conn,
            None => {
                let conn = self.connect()?;
                self.connection = Some(conn);
                conn
            }
        };

        match self
            .egl
            .config_attrib(display, config, ConfigAttrib::NativeVisualId)
        {
            Some(format) => self.egl.set_window_format(window, format),
            None => log::warn!("config reports no native visual id; window format left as-is"),
        }

        let surface = self
            .egl
            .create_window_surface(display, config, window)
            .map_err(InitError::SurfaceCreationFailed)?;

        let context = match self
            .egl
            .create_context(display, config, self.init.client_version)
        {
            Ok(context) => context,
            Err(reason) => {
                self.egl.destroy_surface(display, surface);
                return Err(InitError::ContextCreationFailed(reason));
            }
        };

        if let Err(reason) = self.egl.make_current(display, Some((surface, context))) {
            self.egl.destroy_context(display, context);
            self.egl.destroy_surface(display, surface);
            return Err(InitError::MakeCurrentFailed(reason));
        }

        Ok(WindowTarget {
            display,
            config,
            surface,
            context,
        })
    }

    /// Reads back the drawable size of the target's surface.
    ///
    /// Informational; `(0, 0)` if the driver refuses the query.
    pub fn query_dimensions(&self, target: &WindowTarget<E>) -> (i32, i32) {
        let (width, height) = self
            .egl
            .surface_size(target.display, target.surface)
            .unwrap_or((0, 0));
        log::info!("egl surface dimensions: {width}x{height}");
        (width, height)
    }

    /// Releases the current binding and destroys the target's context and surface.
    ///
    /// `None` is a no-op. The display connection stays open.
    pub fn teardown(&mut self, target: Option<WindowTarget<E>>) {
        let Some(target) = target else {
            return;
        };

        if let Err(reason) = self.egl.make_current(target.display, None) {
            log::warn!("failed to release current context: {reason}");
        }
        self.egl.destroy_context(target.display, target.context);
        self.egl.destroy_surface(target.display, target.surface);
        log::debug!("window target destroyed");
    }

    /// Posts the back buffer to the window.
    pub fn present(&mut self, target: &WindowTarget<E>) -> Result<(), PresentError> {
        self.egl
            .swap_buffers(target.display, target.surface)
            .map_err(PresentError)
    }

    fn connect(&mut self) -> Result<DisplayConnection<E>, InitError> {
        let display = self
            .egl
            .default_display()
            .ok_or(InitError::DisplayUnavailable)?;

        let (major, minor) = self
            .egl
            .initialize(display)
            .map_err(InitError::DisplayInitFailed)?;
        log::info!("EGL {major}.{minor} initialized");

        for which in DisplayString::ALL {
            let value = self.egl.query_string(display, which).unwrap_or_default();
            log::info!("{} : {value}", which.label());
        }

        if self.init.log_configs {
            self.log_configs(display);
        }

        let config = self
            .egl
            .choose_config(display, &self.init.requirements)
            .map_err(InitError::ConfigSelectionFailed)?
            .ok_or_else(|| {
                InitError::ConfigSelectionFailed(format!("{:?}", self.init.requirements))
            })?;

        Ok(DisplayConnection { display, config })
    }

    fn log_configs(&self, display: E::Display) {
        let configs = match self.egl.configs(display) {
            Ok(configs) => configs,
            Err(reason) => {
                log::error!("eglGetConfigs failed: {reason}");
                return;
            }
        };

        log::info!("eglGetConfigs num_configs : {}", configs.len());
        for (i, config) in configs.iter().enumerate() {
            let attrs: Vec<String> = ConfigAttrib::ENUMERATED
                .iter()
                .map(|&a| {
                    let v = self.egl.config_attrib(display, *config, a).unwrap_or(-1);
                    format!("{}={v}", a.label())
                })
                .collect();
            log::info!("config[{i}] {}", attrs.join(" "));
        }
    }
}
