//! Persisted rate snapshot abstractions

use crate::core::rate::RateEntry;
use anyhow::Result;

/// Storage for the last successfully fetched list of rates.
pub trait SnapshotStore: Send + Sync {
    /// Replaces any previous snapshot.
    fn save(&self, rates: &[RateEntry]) -> Result<()>;

    /// Returns `Ok(None)` when no snapshot has been written yet.
    fn load(&self) -> Result<Option<Vec<RateEntry>>>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for &T {
    fn save(&self, rates: &[RateEntry]) -> Result<()> {
        (**self).save(rates)
    }

    fn load(&self) -> Result<Option<Vec<RateEntry>>> {
        (**self).load()
    }
}
