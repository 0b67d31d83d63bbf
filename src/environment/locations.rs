//! Well-known user directories.
//!
//! Configuration files are deployed relative to three directories: the
//! user's home/profile directory, the roaming application-data directory,
//! and the local application-data directory. Each is taken from its Windows
//! environment variable when set, and from the `dirs` crate otherwise.

use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};

/// Resolved user directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLocations {
    /// Home / profile directory (`USERPROFILE`).
    pub home: PathBuf,
    /// Roaming application data (`APPDATA`).
    pub app_data: PathBuf,
    /// Local application data (`LOCALAPPDATA`).
    pub local_app_data: PathBuf,
}

impl UserLocations {
    /// Resolve from the process environment.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with_env(|key: &str| std::env::var(key))
    }

    /// Resolve with a custom env var lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn resolve_with_env<F>(env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let from_env = |var: &str| {
            env_fn(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let home = from_env("USERPROFILE")
            .or_else(|| from_env("HOME"))
            .or_else(dirs::home_dir)
            .ok_or(BootstrapError::LocationUnavailable {
                what: "home directory",
                env_var: "USERPROFILE",
            })?;

        let app_data = from_env("APPDATA")
            .or_else(dirs::config_dir)
            .ok_or(BootstrapError::LocationUnavailable {
                what: "application data directory",
                env_var: "APPDATA",
            })?;

        let local_app_data = from_env("LOCALAPPDATA")
            .or_else(dirs::data_local_dir)
            .ok_or(BootstrapError::LocationUnavailable {
                what: "local application data directory",
                env_var: "LOCALAPPDATA",
            })?;

        Ok(Self {
            home,
            app_data,
            local_app_data,
        })
    }

    /// All three directories under one root (for tests and sandboxes).
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            home: root.join("home"),
            app_data: root.join("appdata").join("Roaming"),
            local_app_data: root.join("appdata").join("Local"),
        }
    }

    /// Neovim configuration directory.
    pub fn nvim_config_dir(&self) -> PathBuf {
        self.local_app_data.join("nvim")
    }
}
