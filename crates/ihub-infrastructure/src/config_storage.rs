//! Client configuration file storage.
//!
//! Loads `config.toml` from the ihub config directory. An absent file is
//! not an error; defaults apply.

use std::fs;
use std::path::PathBuf;

use ihub_core::config::ClientConfig;
use ihub_core::error::{IhubError, Result};

use crate::paths::IhubPaths;

/// Storage for the client configuration file (config.toml).
///
/// Responsibilities:
/// - Load config.toml from the ihub config directory
/// - Parse TOML into the ClientConfig domain model
/// - Fall back to defaults when the file is missing
///
/// Does NOT:
/// - Write or modify configuration (read-only)
/// - Apply environment or command-line overrides (the binary does that)
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a ConfigStorage with the default path (`~/.config/ihub/config.toml`).
    pub fn new() -> Result<Self> {
        let path = IhubPaths::config_file().map_err(|e| IhubError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a ConfigStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, applying defaults for a missing file or
    /// missing fields.
    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file; using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Returns the path to the config file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
