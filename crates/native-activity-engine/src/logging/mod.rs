//! Logging utilities.
//!
//! This module centralizes logger initialization. Everything else logs
//! through the `log` facade; the backend is logcat on Android and
//! `env_logger` on desktop builds.

mod init;

pub use init::{LoggingConfig, init_logging};
