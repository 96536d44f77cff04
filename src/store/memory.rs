use crate::core::cache::SnapshotStore;
use crate::core::rate::RateEntry;
use anyhow::{Result, anyhow};
use std::sync::Mutex;
use tracing::debug;

/// Snapshot held in process memory only.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    inner: Mutex<Option<Vec<RateEntry>>>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: Vec<RateEntry>) -> Self {
        Self {
            inner: Mutex::new(Some(rates)),
        }
    }
}

impl SnapshotStore for MemorySnapshot {
    fn save(&self, rates: &[RateEntry]) -> Result<()> {
        let mut snapshot = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Snapshot lock poisoned"))?;
        debug!("Snapshot PUT: {} rates", rates.len());
        *snapshot = Some(rates.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<RateEntry>>> {
        let snapshot = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Snapshot lock poisoned"))?;
        Ok(snapshot.clone())
    }
}
