//! Store and logging setup from configuration.

use crate::error::CliError;
use mandap_core::{BackendKind, ConfigError, MandapConfig, MandapError};
use mandap_storage::{EntityStore, InMemoryBackend, JsonFileBackend, KeyValueBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Backend chosen at runtime.
pub type AnyBackend = Box<dyn KeyValueBackend>;

/// Install a stderr `fmt` subscriber filtered by `filter`.
pub fn install_logging(filter: &str) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| CliError::Logging {
        filter: filter.to_string(),
        reason: e.to_string(),
    })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| CliError::Logging {
            filter: filter.to_string(),
            reason: e.to_string(),
        })
}

/// Open the configured backend and, if enabled, seed sample data.
pub fn open_store(config: &MandapConfig) -> Result<EntityStore<AnyBackend>, CliError> {
    let backend: AnyBackend = match config.storage.backend {
        BackendKind::Memory => Box::new(InMemoryBackend::new()),
        BackendKind::File => {
            let path = config
                .storage
                .path
                .clone()
                .ok_or_else(|| {
                    MandapError::from(ConfigError::MissingRequired {
                        field: "storage.path".to_string(),
                    })
                })?;
            tracing::debug!(path = %path.display(), "opening data file");
            Box::new(JsonFileBackend::open(path)?)
        }
    };

    let store = EntityStore::new(backend);
    if config.seed_sample_data && store.init()? {
        tracing::info!("empty store seeded with sample data");
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandap_core::StorageConfig;

    #[test]
    fn test_memory_store_is_seeded() {
        let config = MandapConfig {
            storage: StorageConfig {
                backend: BackendKind::Memory,
                path: None,
            },
            ..MandapConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert!(store.is_initialized().unwrap());
        assert_eq!(store.get_all_team_members().unwrap().len(), 3);
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = MandapConfig {
            storage: StorageConfig {
                backend: BackendKind::File,
                path: Some(dir.path().join("data.json")),
            },
            seed_sample_data: false,
            ..MandapConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert!(!store.is_initialized().unwrap());
        assert!(store.get_all_bookings().unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_without_path_fails() {
        let config = MandapConfig {
            storage: StorageConfig {
                backend: BackendKind::File,
                path: None,
            },
            ..MandapConfig::default()
        };
        assert!(matches!(open_store(&config), Err(CliError::Store(_))));
    }

    #[test]
    fn test_bad_log_filter_rejected() {
        let err = install_logging("mandap=loud").unwrap_err();
        assert!(matches!(err, CliError::Logging { .. }));
    }
}
