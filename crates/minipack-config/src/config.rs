//! Configuration model and loading

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Files searched, in order, when no explicit config path is given.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["minipack.toml", ".minipack/config.toml"];

/// Prefix of environment overrides, e.g. `MINIPACK__BUILD__PARALLEL=true`.
pub const ENV_PREFIX: &str = "MINIPACK__";

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Entry module, relative to the project root unless absolute
    pub entry: Option<PathBuf>,
    /// Project root; relative roots are taken from the config file's directory
    pub root: Option<PathBuf>,
    pub resolve: ResolveConfig,
    pub transform: TransformConfig,
    pub build: BuildConfig,
    pub logging: LoggingConfig,
    /// Directory of the config file that was loaded, if any
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

/// Specifier resolution policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Extensions tried, in order, when a specifier does not name a file
    pub extensions: Vec<String>,
    /// Files tried inside a directory specifier
    pub index_files: Vec<String>,
    /// Specifier prefix → path relative to the project root
    pub alias: IndexMap<String, String>,
}

/// Code emission settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub target: Target,
    pub minify: bool,
}

/// ECMAScript version emitted code targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    EsNext,
}

/// Graph construction settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Load modules on a thread pool
    pub parallel: bool,
    /// Pool size for parallel builds; the rayon default when unset
    pub threads: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: ["js", "mjs", "cjs", "jsx", "ts", "tsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            index_files: vec!["index.js".to_string(), "index.ts".to_string()],
            alias: IndexMap::new(),
        }
    }
}

impl ResolveConfig {
    /// Extensions with any leading dot removed.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl PackConfig {
    /// Load configuration from a file and the environment
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables (`MINIPACK__*`, `__` separates sections)
    /// 2. `path` if given, otherwise the first of [`CONFIG_FILE_NAMES`] found
    ///    in the current directory
    /// 3. Default values
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(PackConfig::default()));

        let config_file = match path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => CONFIG_FILE_NAMES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.is_file()),
        };

        if let Some(file) = &config_file {
            tracing::debug!(path = %file.display(), "Loading TOML configuration");
            figment = figment.merge(Toml::file(file));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: PackConfig = figment.extract().map_err(Box::new)?;
        config.config_dir = config_file.as_deref().map(config_base_dir);
        config.validate()?;

        tracing::debug!(
            entry = ?config.entry,
            parallel = config.build.parallel,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        if self.resolve.extensions.iter().any(|ext| ext.is_empty()) {
            return Err(ConfigError::invalid("Resolve extensions cannot be empty"));
        }

        if self
            .resolve
            .alias
            .keys()
            .any(|prefix| prefix.is_empty())
        {
            return Err(ConfigError::invalid("Alias prefixes cannot be empty"));
        }

        if self.build.threads == Some(0) {
            return Err(ConfigError::invalid("Build thread count cannot be 0"));
        }

        Ok(())
    }

    /// Absolute project root.
    ///
    /// A relative `root` is taken from the config file's directory, then from
    /// `cwd`. Without a `root`, the config file's directory or `cwd` is used.
    pub fn project_root(&self, cwd: &Path) -> PathBuf {
        let base = match &self.config_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base.join(root),
            None => base,
        }
    }
}

/// Directory relative config paths are taken from.
///
/// Files inside a `.minipack/` directory belong to the project above it.
fn config_base_dir(file: &Path) -> PathBuf {
    let mut dir = file.parent().unwrap_or(Path::new(""));
    if dir.file_name().is_some_and(|name| name == ".minipack") {
        dir = dir.parent().unwrap_or(Path::new(""));
    }
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir.to_path_buf()
    }
}
