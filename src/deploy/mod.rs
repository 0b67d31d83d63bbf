//! Idempotent configuration file deployment.
//!
//! # Modules
//!
//! - [`fingerprint`] - SHA-256 content hashes
//! - [`backup`] - Timestamped backup names and copies
//! - [`deployer`] - Compare, back up, replace

pub mod backup;
pub mod deployer;
pub mod fingerprint;

pub use backup::{backup_directory, backup_file, backup_path, backup_timestamp, Clock, FixedClock, SystemClock};
pub use deployer::{ConfigDeployer, DeployOutcome, DeploymentRecord};
pub use fingerprint::fingerprint;
