use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::Currency;
use crate::core::rates::{RateProvider, RateTable};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the latest USD-based rates from an exchangerate-api.com v6
/// compatible endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn latest_url(&self) -> String {
        format!(
            "{}/{}/latest/{}",
            self.base_url,
            self.api_key,
            Currency::PIVOT
        )
    }

    // Keeps the key out of logs and error messages
    fn redacted_url(&self) -> String {
        format!("{}/***/latest/{}", self.base_url, Currency::PIVOT)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = self.latest_url();
        let redacted = self.redacted_url();
        debug!("Requesting exchange rates from {}", redacted);

        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        let response = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e.without_url(), redacted))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for URL: {}",
                response.status(),
                redacted
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))?;
        debug!(result = ?data.result, base = ?data.base_code, "Received exchange rate response");

        if data.result.as_deref() == Some("error") {
            bail!(
                "Rate API returned error: {}",
                data.error_type.as_deref().unwrap_or("unknown")
            );
        }

        if let Some(base) = data.base_code.as_deref()
            && base != Currency::PIVOT.code()
        {
            bail!("Unexpected base currency: {}", base);
        }

        let rates = data
            .conversion_rates
            .ok_or_else(|| anyhow!("No conversion rates in response"))?;

        let last_updated = data
            .time_last_update_unix
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());

        RateTable::from_codes(&rates, last_updated)
    }
}
