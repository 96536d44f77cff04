//! Loads the session rate table, falling back to the persisted snapshot
//! when the live source cannot be reached.

use crate::core::cache::SnapshotStore;
use crate::core::rate::{BaseCurrency, RateOrigin, RateTable};
use crate::core::source::RateSource;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no rates available: live fetch failed ({fetch}) and {cache}")]
    RatesUnavailable { fetch: String, cache: String },
}

pub struct RateProvider<S, C> {
    source: S,
    snapshot: C,
    base: BaseCurrency,
}

impl<S: RateSource, C: SnapshotStore> RateProvider<S, C> {
    pub fn new(source: S, snapshot: C, base: BaseCurrency) -> Self {
        Self {
            source,
            snapshot,
            base,
        }
    }

    /// Makes one attempt against the live source, then one snapshot read.
    pub async fn load(&self) -> Result<RateTable, LoadError> {
        let fetch_err = match self.source.fetch_rates().await {
            Ok(sheet) => {
                if let Err(e) = self.snapshot.save(&sheet.rates) {
                    warn!(error = %e, "Could not persist rate snapshot");
                }
                debug!("Loaded {} live rates", sheet.rates.len());
                return Ok(RateTable::with_info(
                    &self.base,
                    sheet.rates,
                    RateOrigin::Live,
                    sheet.info,
                ));
            }
            Err(e) => e,
        };

        warn!(error = %fetch_err, "Live rates unavailable, falling back to snapshot");

        match self.snapshot.load() {
            Ok(Some(rates)) => {
                debug!("Loaded {} cached rates", rates.len());
                Ok(RateTable::new(&self.base, rates, RateOrigin::Cache))
            }
            Ok(None) => Err(LoadError::RatesUnavailable {
                fetch: fetch_err.to_string(),
                cache: "no cached rates exist".to_string(),
            }),
            Err(e) => Err(LoadError::RatesUnavailable {
                fetch: fetch_err.to_string(),
                cache: format!("cached rates are unusable ({e:#})"),
            }),
        }
    }
}
