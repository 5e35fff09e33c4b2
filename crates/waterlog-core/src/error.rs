//! Core error types for waterlog-core.
//!
//! This module defines the error hierarchy using thiserror. Recoverable
//! failures (malformed stored counts, missing notification service) are
//! absorbed where they occur and never reach these types; everything here
//! is propagated to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for waterlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Preferences-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Notification scheduling errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preferences-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save preferences
    #[error("Failed to save preferences to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid preference value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse preferences
    #[error("Failed to parse preferences: {0}")]
    ParseFailed(String),

    /// Preferences directory unavailable
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Notification scheduling errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Permission to deliver notifications was refused
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Host cannot deliver notifications at all
    #[error("Notifications unavailable in this environment: {0}")]
    Unsupported(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
