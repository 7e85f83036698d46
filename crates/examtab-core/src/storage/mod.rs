mod config;
pub mod database;
pub mod kv;

pub use config::{Config, DisplayConfig, FallbackConfig, FeedConfig};
pub use database::Database;
pub use kv::{KeyValueStore, MemoryStore, NoStorage};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `EXAMTAB_DATA_DIR` names the directory outright. Otherwise it is
/// `~/.config/examtab[-dev]/`, with the `-dev` suffix when `EXAMTAB_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("EXAMTAB_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("EXAMTAB_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("examtab-dev")
            } else {
                base_dir.join("examtab")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
