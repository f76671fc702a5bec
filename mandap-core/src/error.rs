//! Error types for Mandap operations
//!
//! Not-found and constraint rejections are not errors: the store reports them
//! with `Ok(None)`. These types cover hard failures only.

use crate::EntityType;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Serialization failed for {entity_type:?}: {reason}")]
    Serialization {
        entity_type: EntityType,
        reason: String,
    },

    #[error("Corrupt data under key {key}: {reason}")]
    CorruptData { key: String, reason: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors raised by input checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Mandap errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MandapError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Mandap operations.
pub type MandapResult<T> = Result<T, MandapError>;
