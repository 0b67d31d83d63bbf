//! Editor starter configuration.
//!
//! The starter is a git repository cloned into the Neovim config directory
//! with its history removed, so the user owns the result.

use std::fs;
use std::path::PathBuf;

use super::context::ProvisionContext;
use super::step::StepOutcome;
use crate::deploy::backup_directory;
use crate::ui::UserInterface;

/// File whose presence means the starter is already in place.
pub fn starter_marker(ctx: &ProvisionContext<'_>) -> PathBuf {
    ctx.locations
        .nvim_config_dir()
        .join("lua")
        .join("config")
        .join("lazy.lua")
}

/// Clone the starter unless it is already configured.
pub fn install_starter(ctx: &mut ProvisionContext<'_>, ui: &mut dyn UserInterface) -> StepOutcome {
    if starter_marker(ctx).is_file() {
        ui.skipped("LazyVim already configured");
        return StepOutcome::skipped();
    }

    if !ctx.tool_exists("git") {
        return StepOutcome::fail(ui, "Git not found - cannot clone LazyVim starter");
    }

    let config_dir = ctx.locations.nvim_config_dir();
    if config_dir.exists() {
        match backup_directory(&config_dir, &ctx.timestamp()) {
            Ok(backup) => ui.warning(&format!(
                "Backed up existing nvim config to {}",
                backup.display()
            )),
            Err(e) => {
                return StepOutcome::fail(
                    ui,
                    format!("Failed to back up {}: {}", config_dir.display(), e),
                )
            }
        }
    }

    if let Some(parent) = config_dir.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return StepOutcome::fail(
                ui,
                format!("Failed to create directory {}: {}", parent.display(), e),
            );
        }
    }

    ui.message("Cloning LazyVim starter...");
    let target = config_dir.to_string_lossy().to_string();
    let repo = ctx.starter_repo.clone();
    let result = ctx.passthrough(ui, "git", &["clone", repo.as_str(), target.as_str()]);
    if !result.success {
        return StepOutcome::fail(ui, "Failed to clone LazyVim starter");
    }

    let git_dir = config_dir.join(".git");
    if git_dir.exists() {
        if let Err(e) = fs::remove_dir_all(&git_dir) {
            tracing::warn!("could not remove {}: {}", git_dir.display(), e);
            ui.warning(&format!("Could not remove {}", git_dir.display()));
        }
    }

    ui.success(&format!(
        "LazyVim starter cloned to {}",
        config_dir.display()
    ));
    StepOutcome::completed()
}
