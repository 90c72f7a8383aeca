use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "native_activity_engine=debug"). When unset, `RUST_LOG` is consulted on
/// desktop builds and `max_level` applies otherwise.
///
/// `tag` is the logcat tag on Android and ignored elsewhere.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub tag: String,
    pub max_level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            tag: "native-activity".to_string(),
            max_level: log::LevelFilter::Info,
        }
    }
}

impl LoggingConfig {
    /// Filter directives in effect, if any.
    fn filter(&self) -> Option<String> {
        if let Some(filter) = &self.env_filter {
            return Some(filter.clone());
        }
        if cfg!(target_os = "android") {
            return None;
        }
        std::env::var("RUST_LOG").ok()
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is first thing in `android_main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        install(&config);
        log::debug!("logging initialized");
    });
}

#[cfg(target_os = "android")]
fn install(config: &LoggingConfig) {
    let mut android = android_logger::Config::default()
        .with_max_level(config.max_level)
        .with_tag(config.tag.as_str());

    if let Some(filter) = config.filter() {
        android = android.with_filter(android_logger::FilterBuilder::new().parse(&filter).build());
    }

    android_logger::init_once(android);
}

#[cfg(not(target_os = "android"))]
fn install(config: &LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    match config.filter() {
        Some(filter) => {
            builder.parse_filters(&filter);
        }
        None => {
            builder.filter_level(config.max_level);
        }
    }

    // Tests may already have installed a logger.
    let _ = builder.try_init();
}
