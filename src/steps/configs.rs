//! Configuration files shipped next to the executable.

use std::path::{Path, PathBuf};

use super::context::ProvisionContext;
use super::step::StepOutcome;
use crate::deploy::DeployOutcome;
use crate::environment::UserLocations;
use crate::ui::UserInterface;

/// User directory a target path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Home,
    AppData,
    LocalAppData,
}

/// One file to deploy. Both paths use `/` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFile {
    /// Relative to the source root.
    pub source: &'static str,
    pub anchor: Anchor,
    /// Relative to the anchor directory.
    pub target: &'static str,
}

/// Files the default plan deploys.
pub const DEFAULT_CONFIGS: &[ConfigFile] = &[
    ConfigFile {
        source: "configs/wezterm/.wezterm.lua",
        anchor: Anchor::Home,
        target: ".wezterm.lua",
    },
    ConfigFile {
        source: "configs/nushell/config.nu",
        anchor: Anchor::AppData,
        target: "nushell/config.nu",
    },
    ConfigFile {
        source: "configs/nushell/env.nu",
        anchor: Anchor::AppData,
        target: "nushell/env.nu",
    },
    ConfigFile {
        source: "configs/starship/starship.toml",
        anchor: Anchor::Home,
        target: ".config/starship.toml",
    },
];

fn join_slashed(base: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

impl ConfigFile {
    /// Source path relative to the source root, in native form.
    pub fn source_path(&self) -> PathBuf {
        join_slashed(Path::new(""), self.source)
    }

    /// Absolute target path.
    pub fn target_path(&self, locations: &UserLocations) -> PathBuf {
        let base = match self.anchor {
            Anchor::Home => &locations.home,
            Anchor::AppData => &locations.app_data,
            Anchor::LocalAppData => &locations.local_app_data,
        };
        join_slashed(base, self.target)
    }
}

/// Deploy every file, reporting each one. A failure does not stop the rest.
pub fn deploy_configs(
    files: &[ConfigFile],
    ctx: &mut ProvisionContext<'_>,
    ui: &mut dyn UserInterface,
) -> StepOutcome {
    let mut outcome = StepOutcome::skipped();

    for file in files {
        let target = file.target_path(&ctx.locations);
        let record = ctx.deployer.deploy(&file.source_path(), &target);

        match record.outcome {
            DeployOutcome::UpToDate => {
                ui.skipped(&format!("{} is up to date", target.display()));
            }
            DeployOutcome::BackedUpAndReplaced { backup } => {
                ui.warning(&format!(
                    "Backed up existing file to {}",
                    backup.display()
                ));
                ui.success(&format!("Deployed {} -> {}", file.source, target.display()));
                outcome.absorb(StepOutcome::completed());
            }
            DeployOutcome::CreatedNew => {
                ui.success(&format!("Deployed {} -> {}", file.source, target.display()));
                outcome.absorb(StepOutcome::completed());
            }
            DeployOutcome::Failed { reason } => outcome.record_failure(ui, reason),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EnvironmentSnapshot, FixedPath};
    use crate::shell::MockRunner;
    use crate::steps::StepStatus;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn seed_sources(root: &Path) {
        for file in DEFAULT_CONFIGS {
            let path = root.join(file.source_path());
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("-- {}", file.source)).unwrap();
        }
    }

    #[test]
    fn target_paths_follow_anchor() {
        let locations = UserLocations::rooted_at(Path::new("/sandbox"));
        assert_eq!(
            DEFAULT_CONFIGS[0].target_path(&locations),
            locations.home.join(".wezterm.lua")
        );
        assert_eq!(
            DEFAULT_CONFIGS[1].target_path(&locations),
            locations.app_data.join("nushell").join("config.nu")
        );
        assert_eq!(
            DEFAULT_CONFIGS[3].target_path(&locations),
            locations.home.join(".config").join("starship.toml")
        );
    }

    #[test]
    fn source_path_is_native() {
        assert_eq!(
            DEFAULT_CONFIGS[2].source_path(),
            Path::new("configs").join("nushell").join("env.nu")
        );
    }

    #[test]
    fn first_deploy_then_up_to_date() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("install");
        seed_sources(&src);
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = ProvisionContext::new(
            &runner,
            &source,
            EnvironmentSnapshot::default(),
            UserLocations::rooted_at(temp.path()),
            &src,
        );

        let mut ui = MockUI::new();
        let first = deploy_configs(DEFAULT_CONFIGS, &mut ctx, &mut ui);
        assert_eq!(first.status, StepStatus::Completed);
        assert_eq!(ui.successes().len(), 4);

        let mut ui = MockUI::new();
        let second = deploy_configs(DEFAULT_CONFIGS, &mut ctx, &mut ui);
        assert_eq!(second.status, StepStatus::Skipped);
        assert_eq!(ui.skips().len(), 4);
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn missing_source_fails_but_others_deploy() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("install");
        seed_sources(&src);
        fs::remove_file(src.join(DEFAULT_CONFIGS[1].source_path())).unwrap();
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = ProvisionContext::new(
            &runner,
            &source,
            EnvironmentSnapshot::default(),
            UserLocations::rooted_at(temp.path()),
            &src,
        );
        let mut ui = MockUI::new();

        let outcome = deploy_configs(DEFAULT_CONFIGS, &mut ctx, &mut ui);

        assert_eq!(outcome.status, StepStatus::Failed);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].starts_with("Source config not found:"));
        assert!(outcome.failures[0].contains("config.nu"));
        assert_eq!(ui.successes().len(), 3);
    }

    #[test]
    fn changed_target_is_backed_up() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("install");
        seed_sources(&src);
        let locations = UserLocations::rooted_at(temp.path());
        let target = DEFAULT_CONFIGS[0].target_path(&locations);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "-- my own").unwrap();
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = ProvisionContext::new(
            &runner,
            &source,
            EnvironmentSnapshot::default(),
            locations,
            &src,
        );
        let mut ui = MockUI::new();

        deploy_configs(&DEFAULT_CONFIGS[..1], &mut ctx, &mut ui);

        assert!(ui.has_warning("Backed up existing file to"));
        assert!(ui.has_success("Deployed configs/wezterm/.wezterm.lua"));
    }
}
