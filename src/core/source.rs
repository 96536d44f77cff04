//! Live rate source abstractions

use crate::core::rate::{RateEntry, TableInfo};
use anyhow::Result;
use async_trait::async_trait;

/// A published table of mid rates as returned by a live source.
#[derive(Debug, Clone, Default)]
pub struct RateSheet {
    pub info: TableInfo,
    pub rates: Vec<RateEntry>,
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateSheet>;
}
