//! The provisioning run.
//!
//! Header, preflight, pipeline, verification, summary. Only a preflight
//! blocker changes the exit code; step failures are reported and the run
//! still exits 0.

use crate::config::Settings;
use crate::environment::{EnvironmentSnapshot, PathSource, UserLocations};
use crate::error::{BootstrapError, Result};
use crate::report::{render_tools, verify_tools, RunReport, ToolCheck, DEFAULT_TOOLS};
use crate::shell::CommandRunner;
use crate::steps::{default_plan, Pipeline, ProvisionContext, Step};
use crate::ui::{should_use_colors, CampTheme, UserInterface};

/// Banner shown at the start of a run.
pub const BANNER: &str = "Workstation Setup";

/// Printed after the summary of a run that reached the end.
pub const NEXT_STEPS: &[&str] = &[
    "Open WezTerm - it launches Nushell automatically",
    "Run 'nvim' to trigger first-time LazyVim plugin install (~1-2 min)",
    "Customize configs in this repo's configs/ directory, re-run setup to apply",
];

/// How a run ended.
#[derive(Debug)]
pub struct RunOutcome {
    /// Process exit code.
    pub exit_code: u8,
    /// The report, when the pipeline ran.
    pub report: Option<RunReport>,
}

impl RunOutcome {
    fn blocked() -> Self {
        Self {
            exit_code: 1,
            report: None,
        }
    }

    fn finished(report: RunReport) -> Self {
        Self {
            exit_code: 0,
            report: Some(report),
        }
    }
}

/// One invocation of the binary.
pub struct RunCommand<'a> {
    settings: Settings,
    runner: &'a dyn CommandRunner,
    path_source: &'a dyn PathSource,
    snapshot: EnvironmentSnapshot,
    locations: UserLocations,
    plan: Vec<Step>,
    tools: &'a [ToolCheck],
    theme: CampTheme,
}

impl<'a> RunCommand<'a> {
    /// A run of the default plan.
    pub fn new(
        settings: Settings,
        runner: &'a dyn CommandRunner,
        path_source: &'a dyn PathSource,
        snapshot: EnvironmentSnapshot,
        locations: UserLocations,
    ) -> Self {
        let theme = CampTheme::for_colors(!settings.no_color && should_use_colors());
        Self {
            settings,
            runner,
            path_source,
            snapshot,
            locations,
            plan: default_plan(),
            tools: DEFAULT_TOOLS,
            theme,
        }
    }

    /// Replace the plan.
    pub fn with_plan(mut self, plan: Vec<Step>) -> Self {
        self.plan = plan;
        self
    }

    /// Replace the tools verified at the end.
    pub fn with_tools(mut self, tools: &'a [ToolCheck]) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_theme(mut self, theme: CampTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Run to completion.
    ///
    /// A preflight blocker is reported through `ui` and yields exit code 1.
    /// Other errors are returned.
    pub fn execute(self, ui: &mut dyn UserInterface) -> Result<RunOutcome> {
        ui.show_header(BANNER);

        match self.settings.preflight().run(&self.snapshot, ui) {
            Ok(()) => {}
            Err(BootstrapError::PreflightBlocked { reason, hint }) => {
                tracing::debug!("preflight blocked: {}", reason);
                ui.error(&reason);
                if let Some(hint) = hint {
                    for line in hint.lines() {
                        ui.warning(line);
                    }
                }
                return Ok(RunOutcome::blocked());
            }
            Err(e) => return Err(e),
        }

        let mut ctx = ProvisionContext::new(
            self.runner,
            self.path_source,
            self.snapshot,
            self.locations,
            self.settings.source_root.clone(),
        )
        .with_starter_repo(self.settings.starter_repo.clone());

        let mut report = Pipeline::new(self.plan).run(&mut ctx, ui)?;

        ui.show_step("Verifying installations");
        ctx.refresh_path();
        report.tools = verify_tools(self.tools, &ctx.snapshot, ctx.runner);

        if self.settings.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| BootstrapError::Other(e.into()))?;
            println!("{}", json);
        } else {
            print_summary(&report, &self.theme, ui);
        }

        tracing::debug!(
            "run finished: {} step(s), {} failure(s)",
            report.steps.len(),
            report.failures.len()
        );
        Ok(RunOutcome::finished(report))
    }
}

fn print_summary(report: &RunReport, theme: &CampTheme, ui: &mut dyn UserInterface) {
    ui.message("");
    for line in render_tools(&report.tools, theme).lines() {
        ui.message(line);
    }
    ui.message("");

    let mut lines = report.summary_lines().into_iter();
    if report.has_failures() {
        if let Some(heading) = lines.next() {
            ui.warning(&heading);
        }
        for line in lines {
            ui.message(&line);
        }
    } else {
        for line in lines {
            ui.success(&line);
        }
    }

    ui.show_step("Next steps");
    for (index, step) in NEXT_STEPS.iter().enumerate() {
        ui.message(&format!("  {}. {}", index + 1, step));
    }
}
