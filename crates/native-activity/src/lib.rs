//! Android native activity drawing a colored triangle fan.
//!
//! The activity's window drives the graphics lifecycle: a window-init builds
//! the EGL surface, GLES 3 context, shader program and buffers, and a
//! window-terminate releases them. While a window is live every loop
//! iteration draws one frame.

use native_activity_engine::logging::LoggingConfig;
use native_activity_engine::runtime::RuntimeConfig;

/// Configuration used by `android_main`.
pub fn app_config() -> (LoggingConfig, RuntimeConfig) {
    (LoggingConfig::default(), RuntimeConfig::default())
}

#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
fn android_main(app: android_activity::AndroidApp) {
    use native_activity_engine::logging::init_logging;
    use native_activity_engine::runtime::Runtime;

    let (logging, runtime) = app_config();
    init_logging(logging);
    log::info!("android_main started");

    if let Err(e) = Runtime::run(app, runtime) {
        log::error!("native activity failed: {e:#}");
    }
}
