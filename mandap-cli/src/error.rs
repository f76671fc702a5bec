//! Error types for the CLI.

use mandap_core::MandapError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Invalid log filter '{filter}': {reason}")]
    Logging { filter: String, reason: String },
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Store(#[from] MandapError),
}

impl CliError {
    /// Process exit code for this failure. Argument errors exit with 2 from clap.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Rejected(_) => 3,
            _ => 1,
        }
    }
}
