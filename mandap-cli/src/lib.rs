//! Mandap command-line front end.
//!
//! One invocation runs one command against a store opened from
//! configuration, then exits.

pub mod commands;
pub mod config;
pub mod error;
pub mod store;

pub use commands::{Cli, Command, ListTarget};
pub use config::{load_config, ConfigSource};
pub use error::CliError;
pub use store::{install_logging, open_store, AnyBackend};
