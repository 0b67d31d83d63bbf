//! Execution environment: search path and user directories.
//!
//! # Modules
//!
//! - [`snapshot`] - Search-path snapshot, tool existence probe, path refresh
//! - [`locations`] - Home and application-data directories

pub mod locations;
pub mod snapshot;

pub use locations::UserLocations;
pub use snapshot::{
    is_executable, parse_path_list, resolve_tool_path, EnvironmentSnapshot, FixedPath,
    PathSource, PersistedPath,
};
