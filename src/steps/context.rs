//! Shared state threaded through every step.

use std::path::PathBuf;

use crate::deploy::{backup_timestamp, Clock, ConfigDeployer, SystemClock};
use crate::environment::{EnvironmentSnapshot, PathSource, UserLocations};
use crate::packages::{MatchStrategy, PackageInstaller};
use crate::shell::{command_line, CommandOptions, CommandResult, CommandRunner};
use crate::ui::UserInterface;

/// Default upstream of the editor starter configuration.
pub const DEFAULT_STARTER_REPO: &str = "https://github.com/LazyVim/starter";

/// Everything a step may touch.
///
/// The snapshot is the only mutable piece: steps that install tools refresh
/// it so later steps resolve against the new search path.
pub struct ProvisionContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub path_source: &'a dyn PathSource,
    pub snapshot: EnvironmentSnapshot,
    pub locations: UserLocations,
    pub deployer: ConfigDeployer,
    pub strategy: MatchStrategy,
    /// Repository cloned into the editor config directory.
    pub starter_repo: String,
    clock: Box<dyn Clock>,
}

impl<'a> ProvisionContext<'a> {
    /// Context with the wall clock, substring matching, and the default
    /// starter repository.
    pub fn new(
        runner: &'a dyn CommandRunner,
        path_source: &'a dyn PathSource,
        snapshot: EnvironmentSnapshot,
        locations: UserLocations,
        source_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            path_source,
            snapshot,
            locations,
            deployer: ConfigDeployer::new(source_root),
            strategy: MatchStrategy::default(),
            starter_repo: DEFAULT_STARTER_REPO.to_string(),
            clock: Box::new(SystemClock),
        }
    }

    /// Use `clock` for backup names of directories moved aside.
    ///
    /// The deployer keeps its own clock; see [`ConfigDeployer::with_clock`].
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_deployer(mut self, deployer: ConfigDeployer) -> Self {
        self.deployer = deployer;
        self
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_starter_repo(mut self, repo: impl Into<String>) -> Self {
        self.starter_repo = repo.into();
        self
    }

    /// Installer bound to this context's runner and path source.
    pub fn installer(&self) -> PackageInstaller<'a> {
        PackageInstaller::new(self.runner, self.path_source, self.strategy)
    }

    /// Options handing children the snapshot's search path.
    pub fn command_options(&self) -> CommandOptions {
        self.snapshot.command_options()
    }

    /// Run `program` capturing output, with the snapshot's search path.
    pub fn capture(&self, program: &str, args: &[&str]) -> CommandResult {
        self.runner.capture(program, args, &self.command_options())
    }

    /// Run `program` on the terminal, with the snapshot's search path.
    ///
    /// The command line is shown as detail first.
    pub fn passthrough(
        &self,
        ui: &mut dyn UserInterface,
        program: &str,
        args: &[&str],
    ) -> CommandResult {
        ui.detail(&command_line(program, args));
        self.runner.passthrough(program, args, &self.command_options())
    }

    /// Re-derive the snapshot from the path source.
    pub fn refresh_path(&mut self) -> bool {
        self.snapshot.refresh(self.path_source, self.runner)
    }

    /// Whether `tool` resolves on the snapshot.
    pub fn tool_exists(&self, tool: &str) -> bool {
        self.snapshot.exists(tool)
    }

    /// Timestamp for backup names.
    pub fn timestamp(&self) -> String {
        backup_timestamp(&self.clock.now())
    }
}
