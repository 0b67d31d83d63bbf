//! Checksum-gated configuration file deployment.

use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::backup::{backup_file, backup_timestamp, Clock, SystemClock};
use super::fingerprint::fingerprint;
use crate::error::{BootstrapError, Result};

/// Result of deploying one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeployOutcome {
    /// Target already had the source's content. Nothing was written.
    UpToDate,
    /// Target differed; the old content was saved to `backup`.
    BackedUpAndReplaced { backup: PathBuf },
    /// There was no target before.
    CreatedNew,
    /// Nothing usable was written.
    Failed { reason: String },
}

/// One source/target pair and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub outcome: DeployOutcome,
}

impl DeploymentRecord {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DeployOutcome::Failed { .. })
    }
}

/// Copies files from the installation's source tree into place.
///
/// A target is only touched when its SHA-256 differs from the source's.
/// Modification times are never consulted.
pub struct ConfigDeployer {
    source_root: PathBuf,
    clock: Box<dyn Clock>,
}

impl ConfigDeployer {
    /// Deployer reading sources below `source_root`, using the wall clock.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self::with_clock(source_root, Box::new(SystemClock))
    }

    /// Deployer with an explicit clock for backup names.
    pub fn with_clock(source_root: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Self {
        Self {
            source_root: source_root.into(),
            clock,
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Deploy `source_rel` (relative to the source root) to `target`.
    pub fn deploy(&self, source_rel: &Path, target: &Path) -> DeploymentRecord {
        let source = self.source_root.join(source_rel);
        let outcome = match self.try_deploy(source_rel, &source, target) {
            Ok(outcome) => outcome,
            Err(e) => DeployOutcome::Failed {
                reason: e.to_string(),
            },
        };
        tracing::debug!("deploy {} -> {}: {:?}", source.display(), target.display(), outcome);

        DeploymentRecord {
            source_path: source,
            target_path: target.to_path_buf(),
            outcome,
        }
    }

    fn try_deploy(&self, source_rel: &Path, source: &Path, target: &Path) -> Result<DeployOutcome> {
        if !source.is_file() {
            return Err(BootstrapError::SourceMissing {
                path: source_rel.to_path_buf(),
            });
        }

        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| deploy_error(source, target, &e))?;

        let source_hash = fingerprint(source)?;

        let backup = if target.exists() {
            let target_hash = fingerprint(target).map_err(|e| deploy_error(source, target, &e))?;
            tracing::debug!(
                "fingerprints for {}: source={} target={}",
                target.display(),
                source_hash,
                target_hash
            );
            if target_hash == source_hash {
                return Ok(DeployOutcome::UpToDate);
            }

            let timestamp = backup_timestamp(&self.clock.now());
            let backup =
                backup_file(target, &timestamp).map_err(|e| deploy_error(source, target, &e))?;
            Some(backup)
        } else {
            None
        };

        replace_atomically(source, target, parent).map_err(|e| deploy_error(source, target, &e))?;

        let written = fingerprint(target).map_err(|e| deploy_error(source, target, &e))?;
        if written != source_hash {
            return Err(BootstrapError::Deploy {
                source_path: source.to_path_buf(),
                target: target.to_path_buf(),
                message: "content changed while copying".to_string(),
            });
        }

        Ok(match backup {
            Some(backup) => DeployOutcome::BackedUpAndReplaced { backup },
            None => DeployOutcome::CreatedNew,
        })
    }
}

/// Copy `source` into a temp file beside `target`, then rename over it.
fn replace_atomically(source: &Path, target: &Path, dir: &Path) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    let mut reader = File::open(source)?;
    io::copy(&mut reader, temp.as_file_mut())?;
    temp.as_file().sync_all()?;

    let permissions = fs::metadata(source)?.permissions();
    fs::set_permissions(temp.path(), permissions)?;

    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

fn deploy_error(source: &Path, target: &Path, err: &io::Error) -> BootstrapError {
    BootstrapError::Deploy {
        source_path: source.to_path_buf(),
        target: target.to_path_buf(),
        message: err.to_string(),
    }
}
