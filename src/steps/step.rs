//! Provisioning steps and their outcomes.

use serde::Serialize;
use std::fmt;

use super::context::ProvisionContext;
use crate::packages::{InstallOutcome, PackageSpec};
use crate::ui::UserInterface;

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step changed something.
    Completed,
    /// Everything was already in place.
    Skipped,
    /// At least one failure was recorded.
    Failed,
}

impl StepStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            StepStatus::Completed => '✓',
            StepStatus::Skipped => '○',
            StepStatus::Failed => '✗',
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Skipped => "skipped",
            StepStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// What one step reports back to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub status: StepStatus,
    /// Messages for the failure log, in order.
    pub failures: Vec<String>,
}

impl StepOutcome {
    pub fn completed() -> Self {
        Self {
            status: StepStatus::Completed,
            failures: Vec::new(),
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: StepStatus::Skipped,
            failures: Vec::new(),
        }
    }

    /// A failed outcome. The message is not printed.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Failed,
            failures: vec![message.into()],
        }
    }

    /// Print `message` as an error and fail with it.
    pub fn fail(ui: &mut dyn UserInterface, message: impl Into<String>) -> Self {
        let message = message.into();
        ui.error(&message);
        Self::failed(message)
    }

    /// Record another failure, printing it. The status becomes `Failed`.
    pub fn record_failure(&mut self, ui: &mut dyn UserInterface, message: impl Into<String>) {
        let message = message.into();
        ui.error(&message);
        self.failures.push(message);
        self.status = StepStatus::Failed;
    }

    /// Fold a sub-task's status into this one.
    ///
    /// Failed beats Completed beats Skipped.
    pub fn absorb(&mut self, other: StepOutcome) {
        self.status = match (self.status, other.status) {
            (StepStatus::Failed, _) | (_, StepStatus::Failed) => StepStatus::Failed,
            (StepStatus::Completed, _) | (_, StepStatus::Completed) => StepStatus::Completed,
            _ => StepStatus::Skipped,
        };
        self.failures.extend(other.failures);
    }
}

impl From<InstallOutcome> for StepOutcome {
    fn from(outcome: InstallOutcome) -> Self {
        match outcome {
            InstallOutcome::Skipped => Self::skipped(),
            InstallOutcome::Installed => Self::completed(),
            InstallOutcome::Failed { message } => Self::failed(message),
        }
    }
}

/// Body of a step.
pub type StepAction = Box<dyn Fn(&mut ProvisionContext<'_>, &mut dyn UserInterface) -> StepOutcome>;

/// One entry of a provisioning plan.
pub struct Step {
    name: String,
    title: String,
    action: StepAction,
}

impl Step {
    /// A step running `action`.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        action: impl Fn(&mut ProvisionContext<'_>, &mut dyn UserInterface) -> StepOutcome + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            action: Box::new(action),
        }
    }

    /// A step that makes sure one package is installed.
    pub fn package(name: impl Into<String>, title: impl Into<String>, spec: PackageSpec) -> Self {
        Self::new(name, title, move |ctx, ui| {
            ctx.installer().install(&spec, &mut ctx.snapshot, ui).into()
        })
    }

    /// Short name used in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Heading shown before the step runs.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Run the step.
    pub fn run(&self, ctx: &mut ProvisionContext<'_>, ui: &mut dyn UserInterface) -> StepOutcome {
        (self.action)(ctx, ui)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
