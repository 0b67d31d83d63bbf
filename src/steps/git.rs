//! Git identity and global defaults.

use super::context::ProvisionContext;
use super::step::StepOutcome;
use crate::ui::{Prompt, UserInterface};

/// Global settings applied where the user has not set them.
pub const GIT_DEFAULTS: &[(&str, &str)] = &[
    ("core.editor", "nvim"),
    ("core.autocrlf", "true"),
    ("init.defaultBranch", "main"),
    ("pull.rebase", "true"),
    ("diff.colorMoved", "default"),
    ("merge.conflictstyle", "diff3"),
];

/// Identity fields: config key, prompt key, question.
const IDENTITY: &[(&str, &str, &str)] = &[
    (
        "user.name",
        "git_user_name",
        "Enter your name (e.g. John Doe)",
    ),
    (
        "user.email",
        "git_user_email",
        "Enter your email (e.g. john@example.com)",
    ),
];

/// Current global value of `key`, if set and non-empty.
fn global_value(ctx: &ProvisionContext<'_>, key: &str) -> Option<String> {
    let result = ctx.capture("git", &["config", "--global", "--get", key]);
    (result.success && !result.output.is_empty()).then_some(result.output)
}

fn set_global(
    ctx: &ProvisionContext<'_>,
    ui: &mut dyn UserInterface,
    key: &str,
    value: &str,
) -> StepOutcome {
    let result = ctx.capture("git", &["config", "--global", key, value]);
    if result.success {
        ui.success(&format!("git {} set to '{}'", key, value));
        StepOutcome::completed()
    } else {
        StepOutcome::fail(ui, format!("Failed to set git {}: {}", key, result.output))
    }
}

/// Ask for `user.name` and `user.email` when they are unset.
///
/// Does nothing when git is not on the search path; the install step has
/// already reported that. An empty answer leaves the value unset. When no
/// answer can be obtained (non-interactive, no override) the field is
/// skipped with a warning.
pub fn configure_identity(ctx: &mut ProvisionContext<'_>, ui: &mut dyn UserInterface) -> StepOutcome {
    if !ctx.tool_exists("git") {
        tracing::debug!("git not on search path, identity left alone");
        return StepOutcome::skipped();
    }

    let mut outcome = StepOutcome::skipped();
    for (key, prompt_key, question) in IDENTITY {
        if let Some(current) = global_value(ctx, key) {
            ui.skipped(&format!("git {} already set to '{}'", key, current));
            continue;
        }

        ui.warning(&format!("Git {} not configured.", key));
        let answer = match ui.prompt(&Prompt::input(prompt_key, question)) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("no answer for {}: {}", prompt_key, e);
                ui.warning(&format!("Skipping git {}: {}", key, e));
                continue;
            }
        };

        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }
        outcome.absorb(set_global(ctx, ui, key, answer));
    }
    outcome
}

/// Apply [`GIT_DEFAULTS`] without overriding existing values.
pub fn apply_defaults(ctx: &mut ProvisionContext<'_>, ui: &mut dyn UserInterface) -> StepOutcome {
    if !ctx.tool_exists("git") {
        return StepOutcome::fail(ui, "Git not found - skipping git config");
    }

    let mut outcome = StepOutcome::skipped();
    for (key, value) in GIT_DEFAULTS {
        match global_value(ctx, key) {
            Some(current) => ui.skipped(&format!("git {} already set to '{}'", key, current)),
            None => outcome.absorb(set_global(ctx, ui, key, value)),
        }
    }
    outcome
}
