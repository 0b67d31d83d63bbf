//! Ordered, non-fatal step execution.

use std::time::Instant;

use super::context::ProvisionContext;
use super::step::{Step, StepStatus};
use crate::error::{BootstrapError, Result};
use crate::report::{RunReport, StepReport};
use crate::ui::UserInterface;

/// Lifecycle of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    NotStarted,
    Running,
    Completed,
}

/// Runs a fixed list of steps once, in order.
///
/// A failing step never stops the steps after it. Its failures are appended
/// to the run's failure log.
#[derive(Debug)]
pub struct Pipeline {
    steps: Vec<Step>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            state: PipelineState::NotStarted,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in run order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Run every step.
    ///
    /// Fails only if the pipeline already ran.
    pub fn run(
        &mut self,
        ctx: &mut ProvisionContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<RunReport> {
        if self.state != PipelineState::NotStarted {
            return Err(BootstrapError::PipelineAlreadyRun);
        }
        self.state = PipelineState::Running;

        let total = self.steps.len();
        let mut report = RunReport::default();

        for (index, step) in self.steps.iter().enumerate() {
            ui.show_step(&format!("Step {}/{}: {}", index + 1, total, step.title()));
            tracing::debug!("step {} starting", step.name());

            let start = Instant::now();
            let mut outcome = step.run(ctx, ui);
            if !outcome.failures.is_empty() {
                outcome.status = StepStatus::Failed;
            }

            tracing::debug!(
                "step {} {} with {} failure(s)",
                step.name(),
                outcome.status,
                outcome.failures.len()
            );

            report.failures.extend(outcome.failures);
            report.steps.push(StepReport {
                name: step.name().to_string(),
                status: outcome.status,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        self.state = PipelineState::Completed;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EnvironmentSnapshot, FixedPath, UserLocations};
    use crate::shell::MockRunner;
    use crate::steps::step::StepOutcome;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    fn context<'a>(runner: &'a MockRunner, source: &'a FixedPath) -> ProvisionContext<'a> {
        ProvisionContext::new(
            runner,
            source,
            EnvironmentSnapshot::default(),
            UserLocations::rooted_at(Path::new("/sandbox")),
            "/src",
        )
    }

    fn recording_step(name: &str, log: &Rc<RefCell<Vec<String>>>, outcome: StepOutcome) -> Step {
        let log = Rc::clone(log);
        let label = name.to_string();
        Step::new(name, name, move |_ctx, _ui| {
            log.borrow_mut().push(label.clone());
            outcome.clone()
        })
    }

    #[test]
    fn runs_steps_in_declared_order() {
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source);
        let mut ui = MockUI::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut pipeline = Pipeline::new(vec![
            recording_step("a", &log, StepOutcome::completed()),
            recording_step("b", &log, StepOutcome::skipped()),
            recording_step("c", &log, StepOutcome::completed()),
        ]);
        let report = pipeline.run(&mut ctx, &mut ui).unwrap();

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.steps[1].status, StepStatus::Skipped);
        assert_eq!(ui.steps()[0], "Step 1/3: a");
        assert_eq!(pipeline.state(), PipelineState::Completed);
    }

    #[test]
    fn failing_step_does_not_stop_later_steps() {
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source);
        let mut ui = MockUI::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut pipeline = Pipeline::new(vec![
            recording_step("first", &log, StepOutcome::completed()),
            recording_step("broken", &log, StepOutcome::failed("broken went wrong")),
            recording_step("last", &log, StepOutcome::completed()),
        ]);
        let report = pipeline.run(&mut ctx, &mut ui).unwrap();

        assert_eq!(*log.borrow(), vec!["first", "broken", "last"]);
        assert_eq!(report.steps[1].status, StepStatus::Failed);
        assert_eq!(report.steps[2].status, StepStatus::Completed);
        assert_eq!(
            report.failures.iter().collect::<Vec<_>>(),
            vec!["broken went wrong"]
        );
    }

    #[test]
    fn failures_accumulate_in_step_order() {
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source);
        let mut ui = MockUI::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut two = StepOutcome::failed("two-a");
        two.failures.push("two-b".into());
        let mut pipeline = Pipeline::new(vec![
            recording_step("one", &log, StepOutcome::failed("one")),
            recording_step("two", &log, two),
        ]);
        let report = pipeline.run(&mut ctx, &mut ui).unwrap();

        assert_eq!(
            report.failures.iter().collect::<Vec<_>>(),
            vec!["one", "two-a", "two-b"]
        );
    }

    #[test]
    fn failures_force_failed_status() {
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source);
        let mut ui = MockUI::new();

        let mut pipeline = Pipeline::new(vec![Step::new("odd", "odd", |_ctx, _ui| StepOutcome {
            status: StepStatus::Completed,
            failures: vec!["something".into()],
        })]);
        let report = pipeline.run(&mut ctx, &mut ui).unwrap();

        assert_eq!(report.steps[0].status, StepStatus::Failed);
    }

    #[test]
    fn second_run_is_rejected() {
        let runner = MockRunner::new();
        let source = FixedPath::default();
        let mut ctx = context(&runner, &source);
        let mut ui = MockUI::new();

        let mut pipeline = Pipeline::new(Vec::new());
        assert!(pipeline.is_empty());
        pipeline.run(&mut ctx, &mut ui).unwrap();

        let err = pipeline.run(&mut ctx, &mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::PipelineAlreadyRun));
    }

    #[test]
    fn steps_share_the_context() {
        let runner = MockRunner::new();
        let source = FixedPath(vec!["/fresh/bin".into()]);
        let mut ctx = context(&runner, &source);
        let mut ui = MockUI::new();

        let mut pipeline = Pipeline::new(vec![
            Step::new("refresh", "refresh", |ctx, _ui| {
                ctx.refresh_path();
                StepOutcome::completed()
            }),
            Step::new("check", "check", |ctx, ui| {
                if ctx.snapshot.entries().is_empty() {
                    StepOutcome::fail(ui, "snapshot not refreshed")
                } else {
                    StepOutcome::completed()
                }
            }),
        ]);
        let report = pipeline.run(&mut ctx, &mut ui).unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(pipeline.step_names(), vec!["refresh", "check"]);
    }
}
