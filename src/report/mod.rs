//! Run summary and tool verification.
//!
//! # Modules
//!
//! - [`run_report`] - Failure log and per-step results
//! - [`verify`] - Version probe and table

pub mod run_report;
pub mod verify;

pub use run_report::{FailureLog, RunReport, StepReport};
pub use verify::{
    check_tool, extract_version, render_tools, verify_tools, ToolCheck, ToolStatus,
    DEFAULT_TOOLS, NOT_FOUND,
};
