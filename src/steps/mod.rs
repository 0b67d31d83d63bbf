//! Provisioning steps and the pipeline that runs them.
//!
//! - [`Step`] - A named action over a shared [`ProvisionContext`]
//! - [`StepOutcome`] - What a step reports: a status and its failures
//! - [`Pipeline`] - Runs steps in order, never stopping on failure
//! - [`default_plan`] - The workstation plan run by the binary
//!
//! # Example
//!
//! ```no_run
//! use basecamp::environment::{EnvironmentSnapshot, PersistedPath, UserLocations};
//! use basecamp::shell::SystemRunner;
//! use basecamp::steps::{default_plan, Pipeline, ProvisionContext};
//! use basecamp::ui::{MockUI, OutputMode};
//!
//! let runner = SystemRunner::new();
//! let source = PersistedPath;
//! let snapshot = EnvironmentSnapshot::capture();
//! let locations = UserLocations::resolve().unwrap();
//! let mut ctx = ProvisionContext::new(&runner, &source, snapshot, locations, ".");
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! let report = Pipeline::new(default_plan()).run(&mut ctx, &mut ui).unwrap();
//! for failure in report.failures.iter() {
//!     println!("{}", failure);
//! }
//! ```

pub mod configs;
pub mod context;
pub mod git;
pub mod pipeline;
pub mod plan;
pub mod starter;
pub mod step;
pub mod toolchain;

pub use configs::{deploy_configs, Anchor, ConfigFile, DEFAULT_CONFIGS};
pub use context::{ProvisionContext, DEFAULT_STARTER_REPO};
pub use git::{apply_defaults, configure_identity, GIT_DEFAULTS};
pub use pipeline::{Pipeline, PipelineState};
pub use plan::default_plan;
pub use starter::{install_starter, starter_marker};
pub use step::{Step, StepAction, StepOutcome, StepStatus};
pub use toolchain::{install_node, install_scoop, SCOOP_INSTALL_SCRIPT};
