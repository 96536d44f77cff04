use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::NbpProviderConfig;
use crate::core::rate::{RateEntry, TableInfo};
use crate::core::source::{RateSheet, RateSource};

/// Fetches the current mid-rate table from the NBP web API.
pub struct NbpProvider {
    base_url: String,
    table: String,
    timeout: Duration,
}

impl NbpProvider {
    pub fn new(base_url: &str, table: &str, timeout: Duration) -> Self {
        NbpProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &NbpProviderConfig) -> Self {
        Self::new(&config.base_url, &config.table, config.timeout())
    }

    fn url(&self) -> String {
        format!(
            "{}/api/exchangerates/tables/{}?format=json",
            self.base_url, self.table
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NbpTable {
    no: Option<String>,
    effective_date: Option<NaiveDate>,
    rates: Vec<RateEntry>,
}

#[async_trait]
impl RateSource for NbpProvider {
    #[instrument(name = "NbpRatesFetch", skip(self), fields(table = %self.table))]
    async fn fetch_rates(&self) -> Result<RateSheet> {
        let url = self.url();
        debug!("Requesting rate table from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("nbpx/0.1")
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for table: {}", e, self.table))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for table: {}",
                response.status(),
                self.table
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response for table {}: {}", self.table, e))?;

        let tables: Vec<NbpTable> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for table {}: {}", self.table, e))?;

        let table = tables
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No rate data found for table: {}", self.table))?;

        debug!(
            no = ?table.no,
            effective_date = ?table.effective_date,
            "Received {} rates",
            table.rates.len()
        );

        Ok(RateSheet {
            info: TableInfo {
                number: table.no,
                effective_date: table.effective_date,
            },
            rates: table.rates,
        })
    }
}
