//! Configuration loading for the CLI.
//!
//! The config file is optional. Without `--config` (or `MANDAP_CONFIG`, read
//! by the argument parser) the defaults apply, then environment overrides,
//! then validation.

use crate::error::CliError;
use mandap_core::MandapConfig;
use std::path::{Path, PathBuf};

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Resolve, read, override and validate the configuration.
pub fn load_config(explicit: Option<PathBuf>) -> Result<(MandapConfig, ConfigSource), CliError> {
    let (config, source) = match explicit {
        Some(path) => (from_path(&path)?, ConfigSource::File(path)),
        None => (MandapConfig::default(), ConfigSource::Defaults),
    };
    let config = config.apply_env();
    config.validate()?;
    Ok((config, source))
}

pub fn from_path(path: &Path) -> Result<MandapConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}
