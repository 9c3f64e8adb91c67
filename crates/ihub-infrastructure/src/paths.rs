//! Unified path management for ihub's local files.
//!
//! All durable client state lives under the platform config directory:
//!
//! ```text
//! ~/.config/ihub/              # Config directory
//! ├── config.toml              # Client configuration (API base URL, timeout)
//! └── session.json             # The persisted bearer token
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for ihub.
pub struct IhubPaths;

impl IhubPaths {
    /// Returns the ihub configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/ihub/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("ihub"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session token.
    ///
    /// # Security Note
    ///
    /// The file is written with 600 permissions on Unix; it holds a live
    /// bearer credential.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_app_name() {
        let config_dir = IhubPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("ihub"));
    }

    #[test]
    fn config_file_is_under_config_dir() {
        let config_file = IhubPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = IhubPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn session_file_is_under_config_dir() {
        let session_file = IhubPaths::session_file().unwrap();
        assert!(session_file.ends_with("session.json"));
        let config_dir = IhubPaths::config_dir().unwrap();
        assert!(session_file.starts_with(&config_dir));
    }
}
