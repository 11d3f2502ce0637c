//! Error types for store, engine and configuration operations

use thiserror::Error;

/// Errors raised by the in-memory relation store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Term not found: {0}")]
    TermNotFound(String),

    #[error("Relation not found: {0}")]
    RelationNotFound(String),

    /// The relation violates a storage invariant
    #[error("Invalid relation: {0}")]
    InvalidRelation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the reasoning engine
///
/// Store failures are carried through untouched; the engine never retries.
#[derive(Error, Debug)]
pub enum InferError<E> {
    /// Rejected before any traversal started
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Relation store error: {0}")]
    Store(#[source] E),
}

impl<E> InferError<E> {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, InferError::InvalidArgument(_))
    }
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// An environment variable held an unparseable value
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
