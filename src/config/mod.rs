//! Run configuration.
//!
//! Basecamp reads no configuration file. A run is tuned by command-line flags,
//! each with a `BASECAMP_*` environment-variable fallback, and resolved into
//! [`Settings`] once at startup.

pub mod settings;

pub use settings::Settings;
