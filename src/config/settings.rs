//! Run settings resolved from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{BootstrapError, Result};
use crate::preflight::Preflight;
use crate::shell::{is_ci, PassthroughStdout};
use crate::ui::OutputMode;

/// Everything a run is tuned by.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory that holds `configs/`.
    pub source_root: PathBuf,
    pub connectivity_url: String,
    pub connectivity_timeout: Duration,
    pub starter_repo: String,
    /// Whether prompts may be shown.
    pub interactive: bool,
    /// Print the run report as JSON. Implies [`OutputMode::Silent`].
    pub json: bool,
    pub output_mode: OutputMode,
    pub no_color: bool,
    pub debug: bool,
}

impl Settings {
    /// Resolve against the real process: CI detection and the executable path.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::resolve(cli, is_ci(), std::env::current_exe)
    }

    /// Resolve with explicit CI state and executable lookup (for testing).
    ///
    /// The executable is only consulted when no source root was given.
    pub fn resolve<F>(cli: &Cli, in_ci: bool, current_exe: F) -> Result<Self>
    where
        F: FnOnce() -> std::io::Result<PathBuf>,
    {
        let source_root = match &cli.source_root {
            Some(root) => root.clone(),
            None => executable_dir(&current_exe()?)?,
        };

        Ok(Self {
            source_root,
            connectivity_url: cli.connectivity_url.clone(),
            connectivity_timeout: Duration::from_secs(cli.connectivity_timeout),
            starter_repo: cli.starter_repo.clone(),
            interactive: !cli.non_interactive && !in_ci,
            json: cli.json,
            // JSON owns stdout.
            output_mode: if cli.json {
                OutputMode::Silent
            } else {
                OutputMode::from_flags(cli.verbose, cli.quiet)
            },
            no_color: cli.no_color,
            debug: cli.debug,
        })
    }

    /// Where installers may write. JSON runs keep stdout for the report.
    pub fn passthrough_stdout(&self) -> PassthroughStdout {
        if self.json {
            PassthroughStdout::Stderr
        } else {
            PassthroughStdout::Inherit
        }
    }

    /// Preflight checks configured by these settings.
    pub fn preflight(&self) -> Preflight {
        Preflight::new(self.connectivity_url.clone(), self.connectivity_timeout)
    }
}

fn executable_dir(exe: &Path) -> Result<PathBuf> {
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        BootstrapError::Other(anyhow::anyhow!(
            "Cannot determine executable directory from {}",
            exe.display()
        ))
    })
}
