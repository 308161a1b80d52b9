//! Application configuration with layered loading.
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: hardcoded in struct `Default` implementations
//! 2. **Config file**: TOML file specified by `HOTSTATE_CONFIG` env var
//! 3. **Environment variables**: `HOTSTATE__*` vars override specific fields
//!
//! # Example
//!
//! ```toml
//! [hot_cache]
//! enabled = true
//! watchlist = ["0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"]
//! shadow_mode = true
//! max_snapshots = 64
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use config::{Config, ConfigError, Environment, File};
use hotstate_core::HotCacheConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "trace", "debug", "info", "warn", "error").
    /// Defaults to `"info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `"json"` or `"pretty"`. Defaults to `"pretty"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

/// Root application configuration for the hot cache host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hot state cache configuration.
    #[serde(default)]
    pub hot_cache: HotCacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable
    /// overrides.
    ///
    /// Environment variables with the `HOTSTATE__` prefix override any field,
    /// using `__` as the nesting separator (e.g.,
    /// `HOTSTATE__HOT_CACHE__ENABLED=true`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or
    /// deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("HOTSTATE").separator("__"))
            .build()?;

        builder.try_deserialize()
    }

    /// Loads configuration from `config/config.toml` with fallback to
    /// defaults.
    ///
    /// The path can be overridden with the `HOTSTATE_CONFIG` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("HOTSTATE_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Validates the configuration for correctness.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if a section is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.hot_cache.validate()?;

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }
}

/// Initializes the global tracing subscriber from `config`.
///
/// The `RUST_LOG` environment variable, when set, overrides the configured
/// level. Calling this twice is a no-op; the first subscriber wins.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
