//! Command-line interface for basecamp.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - The provisioning run driven by those arguments

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::{RunCommand, RunOutcome, BANNER, NEXT_STEPS};
