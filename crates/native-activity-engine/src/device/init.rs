use super::egl::{ConfigAttrib, WINDOW_BIT};

/// Minimum channel/depth sizes a config must provide.
///
/// Sizes are lower bounds, as with `eglChooseConfig`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConfigRequirements {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub min_depth: i32,

    /// Require `EGL_WINDOW_BIT` in the surface type.
    pub window_surface: bool,
}

impl Default for ConfigRequirements {
    fn default() -> Self {
        Self {
            red: 8,
            green: 8,
            blue: 8,
            min_depth: 16,
            window_surface: true,
        }
    }
}

impl ConfigRequirements {
    /// `(attribute, value)` pairs in the order they are handed to the driver.
    pub fn attributes(&self) -> Vec<(ConfigAttrib, i32)> {
        let mut attrs = vec![
            (ConfigAttrib::RedSize, self.red),
            (ConfigAttrib::BlueSize, self.blue),
            (ConfigAttrib::GreenSize, self.green),
            (ConfigAttrib::DepthSize, self.min_depth),
        ];
        if self.window_surface {
            attrs.push((ConfigAttrib::SurfaceType, WINDOW_BIT));
        }
        attrs
    }

    /// Checks a config given an attribute lookup.
    ///
    /// Missing attributes never match.
    pub fn matches<F>(&self, mut attrib: F) -> bool
    where
        F: FnMut(ConfigAttrib) -> Option<i32>,
    {
        self.attributes().into_iter().all(|(a, wanted)| match (a, attrib(a)) {
            (_, None) => false,
            (ConfigAttrib::SurfaceType, Some(mask)) => mask & wanted == wanted,
            (_, Some(have)) => have >= wanted,
        })
    }
}

/// Initialization parameters for the EGL layer.
#[derive(Debug, Clone)]
pub struct EglInit {
    pub requirements: ConfigRequirements,

    /// Value passed as `EGL_CONTEXT_CLIENT_VERSION`.
    pub client_version: i32,

    /// Dump every available config at info level on first connect.
    pub log_configs: bool,
}

impl Default for EglInit {
    fn default() -> Self {
        Self {
            requirements: ConfigRequirements::default(),
            client_version: 3,
            log_configs: true,
        }
    }
}
