//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration.
    #[serde(default)]
    pub store: StoreSettings,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogSettings,
}

/// Which key-value backend holds the collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process memory; state is lost when the process exits.
    Memory,
    /// JSON files under `StoreSettings::root`.
    #[default]
    Fs,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Backend kind.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Root directory for the `fs` backend.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Artificial delay before each store operation, in milliseconds.
    #[serde(default)]
    pub simulated_latency_ms: u64,
    /// Seed the employee roster when the store is opened.
    #[serde(default = "default_seed_on_open")]
    pub seed_on_open: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_seed_on_open() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            root: default_root(),
            simulated_latency_ms: 0,
            seed_on_open: default_seed_on_open(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directives, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "custody=info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CUSTODY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
