//! Package definitions and backend command lines.

use serde::Serialize;
use std::fmt;

/// Which package-manager frontend installs a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Machine-wide manager (`winget`).
    SystemPackageManager,
    /// Per-user manager with buckets (`scoop`).
    UserPackageManager,
}

impl Backend {
    /// Program name of the frontend.
    pub fn program(&self) -> &'static str {
        match self {
            Backend::SystemPackageManager => "winget",
            Backend::UserPackageManager => "scoop",
        }
    }

    /// Arguments that list installed packages, narrowed to `id` where the
    /// frontend supports it.
    pub fn list_args<'a>(&self, id: Option<&'a str>) -> Vec<&'a str> {
        match (self, id) {
            (Backend::SystemPackageManager, Some(id)) => {
                vec!["list", "--id", id, "--accept-source-agreements"]
            }
            (Backend::SystemPackageManager, None) => vec!["list", "--accept-source-agreements"],
            (Backend::UserPackageManager, _) => vec!["list"],
        }
    }

    /// Arguments that install `id` without interactive confirmation.
    pub fn install_args<'a>(&self, id: &'a str) -> Vec<&'a str> {
        match self {
            Backend::SystemPackageManager => vec![
                "install",
                "--id",
                id,
                "--exact",
                "--accept-source-agreements",
                "--accept-package-agreements",
                "--silent",
            ],
            Backend::UserPackageManager => vec!["install", id],
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// A package to make sure is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSpec {
    /// Backend-specific identifier (`Git.Git`, `JetBrainsMono-NF`).
    pub identifier: String,
    /// Human-readable name.
    pub display_name: String,
    /// Frontend that installs it.
    pub backend: Backend,
    /// Bucket to register first (user backend only).
    pub bucket: Option<String>,
}

impl PackageSpec {
    /// A package from the system package manager.
    pub fn system(identifier: &str, display_name: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: display_name.to_string(),
            backend: Backend::SystemPackageManager,
            bucket: None,
        }
    }

    /// A package from the user package manager, optionally from a bucket.
    pub fn user(identifier: &str, bucket: Option<&str>) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: identifier.to_string(),
            backend: Backend::UserPackageManager,
            bucket: bucket.map(str::to_string),
        }
    }
}
