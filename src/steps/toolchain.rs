//! Steps that install tools without a package-manager entry.

use super::context::ProvisionContext;
use super::step::StepOutcome;
use crate::ui::UserInterface;

/// PowerShell one-liner that installs scoop for the current user.
pub const SCOOP_INSTALL_SCRIPT: &str = "Invoke-RestMethod get.scoop.sh | Invoke-Expression";

/// Install the user package manager unless it resolves.
pub fn install_scoop(ctx: &mut ProvisionContext<'_>, ui: &mut dyn UserInterface) -> StepOutcome {
    if ctx.tool_exists("scoop") {
        ui.skipped("Scoop already installed");
        return StepOutcome::skipped();
    }

    ui.message("Installing Scoop...");
    let result = ctx.passthrough(
        ui,
        "powershell",
        &["-NoProfile", "-Command", SCOOP_INSTALL_SCRIPT],
    );
    if !result.success {
        let reason = match result.exit_code {
            Some(code) => format!("exit status {}", code),
            None => "could not start powershell".to_string(),
        };
        return StepOutcome::fail(ui, format!("Failed to install Scoop: {}", reason));
    }

    ctx.refresh_path();
    ui.success("Scoop installed");
    StepOutcome::completed()
}

/// Install Node.js LTS through Volta unless `node` resolves.
pub fn install_node(ctx: &mut ProvisionContext<'_>, ui: &mut dyn UserInterface) -> StepOutcome {
    if ctx.tool_exists("node") {
        let version = ctx.capture("node", &["--version"]);
        ui.skipped(&format!(
            "Node.js already installed ({})",
            version.first_line()
        ));
        return StepOutcome::skipped();
    }

    if !ctx.tool_exists("volta") {
        return StepOutcome::fail(ui, "Volta not found - cannot install Node.js");
    }

    ui.message("Installing Node.js LTS via Volta...");
    let result = ctx.passthrough(ui, "volta", &["install", "node"]);
    if !result.success {
        return StepOutcome::fail(ui, "Failed to install Node.js via Volta");
    }

    ctx.refresh_path();
    ui.success("Node.js LTS installed via Volta");
    StepOutcome::completed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EnvironmentSnapshot, FixedPath, UserLocations};
    use crate::shell::{MockRunner, RunMode};
    use crate::steps::StepStatus;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_fake_binary(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        let file_name = if cfg!(windows) {
            format!("{}.exe", name)
        } else {
            name.to_string()
        };
        let path = dir.join(file_name);
        fs::write(&path, "").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn context<'a>(
        runner: &'a MockRunner,
        source: &'a FixedPath,
        entries: Vec<PathBuf>,
    ) -> ProvisionContext<'a> {
        ProvisionContext::new(
            runner,
            source,
            EnvironmentSnapshot::from_entries(entries),
            UserLocations::rooted_at(Path::new("/sandbox")),
            "/src",
        )
    }

    #[test]
    fn scoop_present_is_skipped() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(temp.path(), "scoop");
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source, vec![temp.path().to_path_buf()]);
        let mut ui = MockUI::new();

        let outcome = install_scoop(&mut ctx, &mut ui);

        assert_eq!(outcome.status, StepStatus::Skipped);
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn scoop_is_bootstrapped_through_powershell() {
        let temp = TempDir::new().unwrap();
        let shims = temp.path().join("shims");
        let runner = MockRunner::new();
        runner.respond("powershell -NoProfile -Command", "", true);
        let hook_dir = shims.clone();
        runner.on_invoke("powershell", move || create_fake_binary(&hook_dir, "scoop"));
        let source = FixedPath(vec![shims]);
        let mut ctx = context(&runner, &source, Vec::new());
        let mut ui = MockUI::new();

        let outcome = install_scoop(&mut ctx, &mut ui);

        assert_eq!(outcome.status, StepStatus::Completed);
        let invocation = &runner.invocations()[0];
        assert_eq!(invocation.mode, RunMode::Passthrough);
        assert!(invocation.command_line.ends_with(SCOOP_INSTALL_SCRIPT));
        assert!(ctx.tool_exists("scoop"));
    }

    #[test]
    fn scoop_failure_is_recorded() {
        let runner = MockRunner::new();
        runner.respond("powershell", "", false);
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source, Vec::new());
        let mut ui = MockUI::new();

        let outcome = install_scoop(&mut ctx, &mut ui);

        assert_eq!(outcome.failures, vec!["Failed to install Scoop: exit status 1"]);
    }

    #[test]
    fn node_present_reports_version() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(temp.path(), "node");
        let runner = MockRunner::new();
        runner.respond("node --version", "v22.11.0", true);
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source, vec![temp.path().to_path_buf()]);
        let mut ui = MockUI::new();

        let outcome = install_node(&mut ctx, &mut ui);

        assert_eq!(outcome.status, StepStatus::Skipped);
        assert!(ui.has_skip("Node.js already installed (v22.11.0)"));
        assert!(!runner.was_invoked("volta"));
    }

    #[test]
    fn node_without_volta_fails() {
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source, Vec::new());
        let mut ui = MockUI::new();

        let outcome = install_node(&mut ctx, &mut ui);

        assert_eq!(
            outcome.failures,
            vec!["Volta not found - cannot install Node.js"]
        );
        assert!(ui.has_error("Volta not found"));
    }

    #[test]
    fn node_is_installed_through_volta() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(temp.path(), "volta");
        let runner = MockRunner::new();
        runner.respond("volta install node", "", true);
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source, vec![temp.path().to_path_buf()]);
        let mut ui = MockUI::new();

        let outcome = install_node(&mut ctx, &mut ui);

        assert_eq!(outcome.status, StepStatus::Completed);
        assert_eq!(runner.invocations()[0].mode, RunMode::Passthrough);
        assert!(ui.has_success("Node.js LTS installed via Volta"));
    }
}
