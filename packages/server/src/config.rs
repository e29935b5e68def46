//! Process configuration file.
//!
//! The file is reserved for future settings: it is read at startup so that a
//! missing or unreadable path fails early, but its entries are not interpreted.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loaded (and currently inert) server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path the configuration was read from, if any
    pub source: Option<PathBuf>,
    /// Non-empty lines of the file, kept verbatim
    pub reserved_entries: Vec<String>,
}

impl ServerConfig {
    /// Read the configuration file at `path`, or return the empty
    /// configuration when no path is given.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let reserved_entries: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        tracing::info!(
            "Loaded config file '{}' ({} reserved entries ignored)",
            path.display(),
            reserved_entries.len()
        );

        Ok(Self {
            source: Some(path.to_path_buf()),
            reserved_entries,
        })
    }
}
