//! Basecamp - Idempotent developer workstation bootstrap.
//!
//! Basecamp installs a fixed set of developer tools through the system and
//! user package managers, deploys configuration files with checksum-based
//! change detection and timestamped backups, and reports what is installed.
//! Running it twice is safe: present tools and current files are skipped.
//!
//! # Modules
//!
//! - [`cli`] - Command-line arguments and the provisioning run
//! - [`config`] - Run settings
//! - [`deploy`] - Fingerprinting, backups, atomic config deployment
//! - [`environment`] - Search-path snapshot and user directories
//! - [`error`] - Error types and result aliases
//! - [`packages`] - Package specs, installed checks, installation
//! - [`preflight`] - Checks that must pass before anything changes
//! - [`report`] - Failure log, run report, tool verification
//! - [`shell`] - External command execution
//! - [`steps`] - Provisioning steps and the pipeline
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use basecamp::report::extract_version;
//!
//! assert_eq!(extract_version("ripgrep 14.1.1 (rev 4649aa9700)"), "14.1.1");
//! assert_eq!(extract_version("no digits here"), "no digits here");
//! ```
//!
//! For whole-run behavior, see the integration tests.

pub mod cli;
pub mod config;
pub mod deploy;
pub mod environment;
pub mod error;
pub mod packages;
pub mod preflight;
pub mod report;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{BootstrapError, Result};
