//! Configuration types

use crate::{ConfigError, MandapError, MandapResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which key-value backend holds the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process-local map, lost on exit.
    Memory,
    /// Single JSON file on disk.
    #[default]
    File,
}

/// Storage backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: BackendKind,
    /// Data file, required for the file backend.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            path: Some(PathBuf::from("mandap-data.json")),
        }
    }
}

/// Master configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MandapConfig {
    pub storage: StorageConfig,
    /// Write sample team, booking and budget data into an empty store.
    pub seed_sample_data: bool,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl Default for MandapConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            seed_sample_data: true,
            log_filter: "info".to_string(),
        }
    }
}

impl MandapConfig {
    /// Validate the configuration.
    ///
    /// Validates:
    /// - the file backend has a non-empty path
    /// - log_filter is not blank
    pub fn validate(&self) -> MandapResult<()> {
        if self.storage.backend == BackendKind::File {
            match &self.storage.path {
                None => {
                    return Err(MandapError::Config(ConfigError::MissingRequired {
                        field: "storage.path".to_string(),
                    }));
                }
                Some(path) if path.as_os_str().is_empty() => {
                    return Err(MandapError::Config(ConfigError::InvalidValue {
                        field: "storage.path".to_string(),
                        value: String::new(),
                        reason: "path must not be empty for the file backend".to_string(),
                    }));
                }
                Some(_) => {}
            }
        }

        if self.log_filter.trim().is_empty() {
            return Err(MandapError::Config(ConfigError::InvalidValue {
                field: "log_filter".to_string(),
                value: self.log_filter.clone(),
                reason: "log_filter must not be blank".to_string(),
            }));
        }

        Ok(())
    }

    /// Apply environment overrides.
    ///
    /// Environment variables:
    /// - `MANDAP_DATA_PATH`: data file path (forces the file backend)
    /// - `MANDAP_LOG`: log filter directives
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var("MANDAP_DATA_PATH").ok(),
            std::env::var("MANDAP_LOG").ok(),
        )
    }

    fn apply_overrides(mut self, data_path: Option<String>, log: Option<String>) -> Self {
        if let Some(path) = data_path.filter(|p| !p.trim().is_empty()) {
            self.storage.backend = BackendKind::File;
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(filter) = log.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }
}
