//! Error types for basecamp operations.
//!
//! This module defines [`BootstrapError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Only preflight blockers and startup problems stop a run
//! - Everything raised inside a provisioning step is converted into a
//!   failure entry of the run report and the pipeline keeps going
//! - Use `anyhow::Error` (via `BootstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for basecamp operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A precondition for provisioning is not met; the run must not start.
    #[error("Preflight check failed: {reason}")]
    PreflightBlocked {
        reason: String,
        /// Extra guidance shown under the error.
        hint: Option<String>,
    },

    /// A configuration source file shipped with the installation is missing.
    #[error("Source config not found: {path}")]
    SourceMissing { path: PathBuf },

    /// A well-known user directory could not be determined.
    #[error("Cannot determine {what}; set {env_var}")]
    LocationUnavailable {
        what: &'static str,
        env_var: &'static str,
    },

    /// Copying a configuration file into place failed.
    #[error("Failed to deploy {source_path} -> {target}: {message}")]
    Deploy {
        source_path: PathBuf,
        target: PathBuf,
        message: String,
    },

    /// A prompt needs an answer but no terminal or override is available.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// A pipeline was asked to run after it already ran.
    #[error("Pipeline has already run")]
    PipelineAlreadyRun,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BootstrapError {
    /// Whether this error must abort the process with exit code 1.
    pub fn is_preflight_blocker(&self) -> bool {
        matches!(self, BootstrapError::PreflightBlocked { .. })
    }
}

/// Result type alias for basecamp operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_blocked_displays_reason() {
        let err = BootstrapError::PreflightBlocked {
            reason: "winget is not available".into(),
            hint: None,
        };
        assert!(err.to_string().contains("winget is not available"));
        assert!(err.is_preflight_blocker());
    }

    #[test]
    fn source_missing_displays_path() {
        let err = BootstrapError::SourceMissing {
            path: PathBuf::from("configs/wezterm/.wezterm.lua"),
        };
        assert!(err.to_string().contains(".wezterm.lua"));
        assert!(!err.is_preflight_blocker());
    }

    #[test]
    fn location_unavailable_names_env_var() {
        let err = BootstrapError::LocationUnavailable {
            what: "home directory",
            env_var: "USERPROFILE",
        };
        let msg = err.to_string();
        assert!(msg.contains("home directory"));
        assert!(msg.contains("USERPROFILE"));
    }

    #[test]
    fn deploy_error_displays_both_paths() {
        let err = BootstrapError::Deploy {
            source_path: PathBuf::from("/src/a.conf"),
            target: PathBuf::from("/dst/a.conf"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/src/a.conf"));
        assert!(msg.contains("/dst/a.conf"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn prompt_unavailable_names_key() {
        let err = BootstrapError::PromptUnavailable {
            key: "git_user_name".into(),
        };
        assert!(err.to_string().contains("git_user_name"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BootstrapError = io_err.into();
        assert!(matches!(err, BootstrapError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(BootstrapError::PipelineAlreadyRun)
        }
        assert!(returns_error().is_err());
    }
}
