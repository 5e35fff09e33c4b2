mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/waterlog[-dev]/` based on WATERLOG_ENV.
///
/// Set WATERLOG_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WATERLOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("waterlog-dev")
    } else {
        base_dir.join("waterlog")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
