//! Package installation through external package managers.
//!
//! # Modules
//!
//! - [`spec`] - What to install and the frontend command lines
//! - [`inventory`] - Installed-package checks with a swappable match rule
//! - [`installer`] - Check, install, refresh

pub mod installer;
pub mod inventory;
pub mod spec;

pub use installer::{InstallOutcome, PackageInstaller};
pub use inventory::{ListingInventory, MatchStrategy, PackageInventory};
pub use spec::{Backend, PackageSpec};
