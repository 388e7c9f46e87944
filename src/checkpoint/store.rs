//! YAML persistence for the poll checkpoint

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

use super::{format_timestamp, Checkpoint};

/// On-disk shape of the checkpoint file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointFile {
    pub last_queried: Checkpoint,
}

/// Manages the checkpoint file with a backup-then-overwrite commit so a crash
/// mid-write never destroys the last-known-good checkpoint.
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!("{name}.backup"))
    }

    /// Load the checkpoint file, or create it with the default range when
    /// absent. Parse failures surface as configuration errors before any
    /// network activity happens.
    pub fn load_or_init(&self) -> Result<CheckpointFile> {
        if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            let file: CheckpointFile = serde_yaml::from_str(&content).map_err(|e| {
                Error::Config(format!(
                    "checkpoint file '{}' is corrupted or not in the expected format: {e}",
                    self.path.display()
                ))
            })?;
            info!("Checkpoint file '{}' loaded", self.path.display());
            Ok(file)
        } else {
            info!("Checkpoint file not found, creating with default range");
            let file = CheckpointFile::bootstrap(Utc::now());
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, serde_yaml::to_string(&file)?)?;
            Ok(file)
        }
    }

    /// Overwrite the checkpoint file with `file`, copying the existing file to
    /// `<name>.backup` first. A failed backup aborts the commit; the old file
    /// stays authoritative.
    pub fn commit(&self, file: &CheckpointFile) -> Result<()> {
        if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup)?;
            info!(
                "Backed up checkpoint before overwriting: {} -> {}",
                self.path.display(),
                backup.display()
            );
        }
        fs::write(&self.path, serde_yaml::to_string(file)?)?;
        info!("Updated checkpoint file '{}'", self.path.display());
        Ok(())
    }
}

impl CheckpointFile {
    /// Default first-run range: a far-past lower bound and an upper bound of
    /// yesterday, so the first poll covers the last day.
    fn bootstrap(now: chrono::DateTime<Utc>) -> Self {
        let far_past = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();
        let yesterday = now - Duration::days(1);
        Self {
            last_queried: Checkpoint {
                created_from: format_timestamp(&far_past),
                created_to: format_timestamp(&yesterday),
            },
        }
    }
}
