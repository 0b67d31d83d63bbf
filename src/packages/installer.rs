//! Check-then-install for a single package.

use serde::Serialize;

use super::inventory::{ListingInventory, MatchStrategy, PackageInventory};
use super::spec::{Backend, PackageSpec};
use crate::environment::{EnvironmentSnapshot, PathSource};
use crate::shell::{command_line, CommandRunner};
use crate::ui::UserInterface;

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// Already present, nothing was run.
    Skipped,
    /// The install command succeeded.
    Installed,
    /// The install command failed; `message` goes to the failure log.
    Failed { message: String },
}

/// Installs packages through their frontend.
pub struct PackageInstaller<'a> {
    runner: &'a dyn CommandRunner,
    path_source: &'a dyn PathSource,
    strategy: MatchStrategy,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        path_source: &'a dyn PathSource,
        strategy: MatchStrategy,
    ) -> Self {
        Self {
            runner,
            path_source,
            strategy,
        }
    }

    /// Make sure `spec` is installed.
    ///
    /// On a successful install the snapshot's search path is refreshed so
    /// later steps can find the new tool.
    pub fn install(
        &self,
        spec: &PackageSpec,
        snapshot: &mut EnvironmentSnapshot,
        ui: &mut dyn UserInterface,
    ) -> InstallOutcome {
        let program = spec.backend.program();
        if !snapshot.exists(program) {
            let message = format!("{} not found - cannot install {}", program, spec.display_name);
            ui.error(&message);
            return InstallOutcome::Failed { message };
        }

        if let (Backend::UserPackageManager, Some(bucket)) = (spec.backend, &spec.bucket) {
            self.ensure_bucket(bucket, snapshot, ui);
        }

        let options = snapshot.command_options();
        let inventory = ListingInventory::new(self.runner, &options, spec.backend, self.strategy);

        let mut spinner = ui.start_spinner(&format!("Checking {}...", spec.display_name));
        if inventory.is_installed(&spec.identifier) {
            spinner.finish_skipped(&already_installed(spec));
            return InstallOutcome::Skipped;
        }
        spinner.clear();

        ui.message(&installing(spec));
        let args = spec.backend.install_args(&spec.identifier);
        ui.detail(&command_line(program, &args));
        let result = self.runner.passthrough(program, &args, &options);

        if !result.success {
            let message = install_failed(spec);
            tracing::debug!(
                "{} exited with {:?} for {}",
                program,
                result.exit_code,
                spec.identifier
            );
            ui.error(&message);
            return InstallOutcome::Failed { message };
        }

        snapshot.refresh(self.path_source, self.runner);
        ui.success(&installed(spec));
        InstallOutcome::Installed
    }

    /// Register `bucket` unless it already is. A failure only warns.
    fn ensure_bucket(
        &self,
        bucket: &str,
        snapshot: &EnvironmentSnapshot,
        ui: &mut dyn UserInterface,
    ) {
        let options = snapshot.command_options();
        let inventory = ListingInventory::new(
            self.runner,
            &options,
            Backend::UserPackageManager,
            self.strategy,
        );
        if inventory.has_bucket(bucket) {
            return;
        }

        ui.message(&format!("Adding scoop bucket '{}'...", bucket));
        let args = ["bucket", "add", bucket];
        ui.detail(&command_line("scoop", &args));
        let result = self.runner.capture("scoop", &args, &options);
        if !result.success {
            tracing::warn!("bucket add {} failed: {}", bucket, result.output);
            ui.warning(&format!("Could not add scoop bucket '{}'", bucket));
        }
    }
}

fn already_installed(spec: &PackageSpec) -> String {
    match spec.backend {
        Backend::SystemPackageManager => format!("{} already installed", spec.display_name),
        Backend::UserPackageManager => format!("{} already installed (scoop)", spec.identifier),
    }
}

fn installing(spec: &PackageSpec) -> String {
    match spec.backend {
        Backend::SystemPackageManager => format!("Installing {}...", spec.display_name),
        Backend::UserPackageManager => format!("Installing {} via scoop...", spec.identifier),
    }
}

fn installed(spec: &PackageSpec) -> String {
    match spec.backend {
        Backend::SystemPackageManager => format!("{} installed", spec.display_name),
        Backend::UserPackageManager => format!("{} installed (scoop)", spec.identifier),
    }
}

fn install_failed(spec: &PackageSpec) -> String {
    match spec.backend {
        Backend::SystemPackageManager => {
            format!("Failed to install {} ({})", spec.display_name, spec.identifier)
        }
        Backend::UserPackageManager => format!("Failed to install {} via scoop", spec.identifier),
    }
}
