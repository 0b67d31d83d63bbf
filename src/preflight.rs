//! Checks that must pass before any step runs.
//!
//! A failed check is a [`BootstrapError::PreflightBlocked`] and ends the
//! process with exit code 1. Nothing has been changed on the machine at that
//! point.

use std::time::Duration;

use crate::environment::EnvironmentSnapshot;
use crate::error::{BootstrapError, Result};
use crate::packages::Backend;
use crate::ui::UserInterface;

/// URL probed for internet access.
pub const DEFAULT_CONNECTIVITY_URL: &str = "https://www.github.com";

/// How long the connectivity probe may take.
pub const DEFAULT_CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Store page of the package that ships `winget`.
pub const APP_INSTALLER_URL: &str = "https://apps.microsoft.com/detail/9NBLGGH4NNS1";

/// The system package manager must resolve on the search path.
pub fn check_frontend(snapshot: &EnvironmentSnapshot) -> Result<()> {
    let program = Backend::SystemPackageManager.program();
    if snapshot.exists(program) {
        return Ok(());
    }
    Err(BootstrapError::PreflightBlocked {
        reason: format!("{} is not available", program),
        hint: Some(format!(
            "Install 'App Installer' from the Microsoft Store, then re-run this program.\n{}",
            APP_INSTALLER_URL
        )),
    })
}

/// Host name shown in the connectivity error, without a leading `www.`.
fn display_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// `url` must answer within `timeout`.
///
/// Any HTTP response counts, whatever its status. Only a transport error
/// (DNS, refused connection, TLS, timeout) blocks the run.
pub fn check_connectivity(url: &str, timeout: Duration) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| BootstrapError::Other(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

    match client.get(url).send() {
        Ok(response) => {
            tracing::debug!("connectivity probe {} -> {}", url, response.status());
            Ok(())
        }
        Err(e) => {
            tracing::debug!("connectivity probe {} failed: {}", url, e);
            Err(BootstrapError::PreflightBlocked {
                reason: format!(
                    "Cannot reach {}. Check your internet connection.",
                    display_host(url)
                ),
                hint: None,
            })
        }
    }
}

/// The preflight checks of one run.
#[derive(Debug, Clone)]
pub struct Preflight {
    pub connectivity_url: String,
    pub connectivity_timeout: Duration,
}

impl Default for Preflight {
    fn default() -> Self {
        Self {
            connectivity_url: DEFAULT_CONNECTIVITY_URL.to_string(),
            connectivity_timeout: DEFAULT_CONNECTIVITY_TIMEOUT,
        }
    }
}

impl Preflight {
    pub fn new(connectivity_url: impl Into<String>, connectivity_timeout: Duration) -> Self {
        Self {
            connectivity_url: connectivity_url.into(),
            connectivity_timeout,
        }
    }

    /// Run every check, stopping at the first blocker.
    pub fn run(&self, snapshot: &EnvironmentSnapshot, ui: &mut dyn UserInterface) -> Result<()> {
        ui.show_step("Running preflight checks");

        check_frontend(snapshot)?;
        ui.success(&format!("{} found", Backend::SystemPackageManager.program()));

        let mut spinner = ui.start_spinner("Checking internet connectivity...");
        match check_connectivity(&self.connectivity_url, self.connectivity_timeout) {
            Ok(()) => {
                spinner.finish_success("Internet connectivity OK");
                Ok(())
            }
            Err(e) => {
                spinner.clear();
                Err(e)
            }
        }
    }
}
