use crate::core::cache::SnapshotStore;
use crate::core::rate::RateEntry;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Snapshot kept as a bare JSON array of rate objects.
#[derive(Debug, Clone)]
pub struct DiskSnapshot {
    path: PathBuf,
}

impl DiskSnapshot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStore for DiskSnapshot {
    fn save(&self, rates: &[RateEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string(rates)?;
        fs::write(&self.path, json).with_context(|| {
            format!("Failed to write rate snapshot to {}", self.path.display())
        })?;
        debug!("Snapshot PUT: {} rates to {}", rates.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<RateEntry>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Snapshot MISS: {} does not exist", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read rate snapshot {}", self.path.display())
                });
            }
        };

        let rates: Vec<RateEntry> = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse rate snapshot {}", self.path.display())
        })?;
        debug!("Snapshot HIT: {} rates from {}", rates.len(), self.path.display());
        Ok(Some(rates))
    }
}
