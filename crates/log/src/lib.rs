//! # formcheck-log
//!
//! Logging bootstrap for applications embedding `formcheck-validator`.
//!
//! The validator emits `tracing` events only; this crate installs a
//! `tracing-subscriber` stack (env filter plus a pretty, compact or JSON fmt
//! layer) from a serializable [`Config`].
//!
//! ```rust,ignore
//! formcheck_log::init(formcheck_log::Config::from_env())?;
//! ```

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, DisplayConfig, Format, Writer};
pub use error::{LogError, LogResult};

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails on unparsable filter directives or when a subscriber is already set.
pub fn init(config: Config) -> LogResult<()> {
    LoggerBuilder::from_config(config).build()
}

/// Install [`Config::test`] once per process.
///
/// Later calls, and calls after another subscriber was installed, are no-ops.
pub fn init_test() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        if let Err(e) = init(Config::test()) {
            tracing::trace!(error = %e, "test logger not installed");
        }
    });
}
