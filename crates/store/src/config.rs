//! Store configuration types.

use std::path::PathBuf;
use std::time::Duration;

use custody_shared::{StoreBackend, StoreSettings};

/// Key-value backend holding the collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProvider {
    /// In-process memory; contents vanish with the store.
    Memory,
    /// Local filesystem, one file per collection under `root`.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StoreProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::LocalFs { .. } => "fs",
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend provider.
    pub provider: StoreProvider,
    /// Delay awaited before each operation.
    pub simulated_latency: Duration,
    /// Seed missing collections when the store is opened.
    pub seed_on_open: bool,
}

impl StoreConfig {
    /// Create a new store config with default settings.
    #[must_use]
    pub fn new(provider: StoreProvider) -> Self {
        Self {
            provider,
            simulated_latency: Duration::ZERO,
            seed_on_open: true,
        }
    }

    /// Create an in-memory store config.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(StoreProvider::Memory)
    }

    /// Set the simulated latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    /// Enable or disable seeding on open.
    #[must_use]
    pub fn with_seed_on_open(mut self, seed: bool) -> Self {
        self.seed_on_open = seed;
        self
    }
}

impl From<&StoreSettings> for StoreConfig {
    fn from(settings: &StoreSettings) -> Self {
        let provider = match settings.backend {
            StoreBackend::Memory => StoreProvider::Memory,
            StoreBackend::Fs => StoreProvider::local_fs(settings.root.clone()),
        };
        Self::new(provider)
            .with_latency(Duration::from_millis(settings.simulated_latency_ms))
            .with_seed_on_open(settings.seed_on_open)
    }
}
