//! The default workstation plan.

use super::configs::{deploy_configs, DEFAULT_CONFIGS};
use super::git::{apply_defaults, configure_identity};
use super::starter::install_starter;
use super::step::{Step, StepOutcome};
use super::toolchain::{install_node, install_scoop};
use crate::packages::PackageSpec;

/// Steps run by a normal invocation, in order.
pub fn default_plan() -> Vec<Step> {
    let git = PackageSpec::system("Git.Git", "Git");

    vec![
        Step::new("scoop", "Scoop (package manager)", install_scoop),
        Step::new("git", "Git", move |ctx, ui| {
            let mut outcome: StepOutcome =
                ctx.installer().install(&git, &mut ctx.snapshot, ui).into();
            // Identity needs the freshly installed git on the search path.
            outcome.absorb(configure_identity(ctx, ui));
            outcome
        }),
        Step::package(
            "nerd-font",
            "JetBrainsMono Nerd Font",
            PackageSpec::user("JetBrainsMono-NF", Some("nerd-fonts")),
        ),
        Step::package(
            "zig",
            "Zig (C compiler for Treesitter)",
            PackageSpec::system("zig.zig", "Zig"),
        ),
        Step::package(
            "ripgrep",
            "ripgrep",
            PackageSpec::system("BurntSushi.ripgrep.MSVC", "ripgrep"),
        ),
        Step::package("fd", "fd", PackageSpec::system("sharkdp.fd", "fd")),
        Step::package(
            "volta",
            "Volta (JS toolchain manager)",
            PackageSpec::system("Volta.Volta", "Volta"),
        ),
        Step::new("node", "Node.js LTS (via Volta)", install_node),
        Step::package(
            "nushell",
            "Nushell",
            PackageSpec::system("Nushell.Nushell", "Nushell"),
        ),
        Step::package(
            "starship",
            "Starship (prompt)",
            PackageSpec::system("Starship.Starship", "Starship"),
        ),
        Step::package(
            "wezterm",
            "WezTerm",
            PackageSpec::system("wez.wezterm", "WezTerm"),
        ),
        Step::package(
            "neovim",
            "Neovim",
            PackageSpec::system("Neovim.Neovim", "Neovim"),
        ),
        Step::new("lazyvim", "LazyVim (Neovim distribution)", install_starter),
        Step::new("configs", "Deploying configuration files", |ctx, ui| {
            deploy_configs(DEFAULT_CONFIGS, ctx, ui)
        }),
        Step::new("git-defaults", "Configuring Git defaults", apply_defaults),
    ]
}
