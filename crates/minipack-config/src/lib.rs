//! Configuration management for minipack
//!
//! [`PackConfig`] is assembled by figment from defaults, a TOML file and
//! `MINIPACK__` environment variables. [`logging::initialize`] installs the
//! tracing subscriber described by its `logging` section.

pub mod config;
pub mod logging;

pub use config::{
    BuildConfig, ConfigError, ConfigResult, LogFormat, LoggingConfig, PackConfig, ResolveConfig,
    Target, TransformConfig,
};
