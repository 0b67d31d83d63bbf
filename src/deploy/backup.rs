//! Timestamped backups beside the original.
//!
//! A backup of `x` is named `x.bak.<YYYYMMDD-HHMMSS>`. Backups are never
//! pruned. When two backups of the same path land in the same second the
//! later one gets a `-1`, `-2`, ... suffix instead of overwriting.

use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Timestamp format used in backup names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Source of the current time for backup names.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Format `time` for a backup name.
pub fn backup_timestamp(time: &DateTime<Local>) -> String {
    time.format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

/// First unused backup name for `original`.
pub fn backup_path(original: &Path, timestamp: &str) -> PathBuf {
    let mut base = OsString::from(original.as_os_str());
    base.push(".bak.");
    base.push(timestamp);

    let candidate = PathBuf::from(&base);
    if !candidate.exists() {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let mut name = base.clone();
        name.push(format!("-{}", n));
        let candidate = PathBuf::from(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Copy the file at `original` to a fresh backup name.
pub fn backup_file(original: &Path, timestamp: &str) -> io::Result<PathBuf> {
    let backup = backup_path(original, timestamp);
    fs::copy(original, &backup)?;
    tracing::debug!("backed up {} to {}", original.display(), backup.display());
    Ok(backup)
}

/// Move the directory at `original` out of the way.
pub fn backup_directory(original: &Path, timestamp: &str) -> io::Result<PathBuf> {
    let backup = backup_path(original, timestamp);
    fs::rename(original, &backup)?;
    tracing::debug!("moved {} to {}", original.display(), backup.display());
    Ok(backup)
}
