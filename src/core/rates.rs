//! Exchange rate snapshot and the provider abstraction

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Display;

use super::currency::Currency;

/// Message shown to the user whenever rates could not be obtained.
pub const FETCH_FAILURE_MESSAGE: &str = "Unable to retrieve exchange rates, please retry.";

/// Units of each supported currency per one unit of [`Currency::PIVOT`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<Currency, f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Builds a table from a provider mapping keyed by currency code.
    ///
    /// Codes outside the supported set are dropped. Every supported currency
    /// must be present with a finite, positive rate.
    pub fn from_codes(
        all_rates: &HashMap<String, f64>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let mut rates = HashMap::with_capacity(Currency::ALL.len());
        for currency in Currency::ALL {
            let Some(rate) = all_rates.get(currency.code()) else {
                bail!("Missing rate for currency: {}", currency);
            };
            if !rate.is_finite() || *rate <= 0.0 {
                bail!("Invalid rate {} for currency: {}", rate, currency);
            }
            rates.insert(currency, *rate);
        }

        Ok(Self {
            rates,
            last_updated,
        })
    }

    /// Rate for a currency code, `None` when the code is not in the table.
    pub fn get(&self, code: &str) -> Option<f64> {
        code.parse::<Currency>()
            .ok()
            .and_then(|currency| self.rate(currency))
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(&currency).copied()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Supported currencies with their rates, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        Currency::ALL
            .into_iter()
            .filter_map(|currency| self.rate(currency).map(|rate| (currency, rate)))
    }
}

#[cfg(test)]
impl RateTable {
    pub(crate) fn from_pairs(pairs: &[(Currency, f64)]) -> Self {
        Self {
            rates: pairs.iter().copied().collect(),
            last_updated: None,
        }
    }
}

/// Lifecycle of the session's rate snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RateState {
    #[default]
    Unloaded,
    Loaded(RateTable),
    Failed(String),
}

impl RateState {
    pub fn table(&self) -> Option<&RateTable> {
        match self {
            RateState::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RateState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The only error surfaced for a failed fetch. The cause is kept for logging
/// but never shown to the user.
#[derive(Debug)]
pub struct RateFetchFailure {
    cause: anyhow::Error,
}

impl RateFetchFailure {
    pub fn new(cause: anyhow::Error) -> Self {
        Self { cause }
    }
}

impl Display for RateFetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{FETCH_FAILURE_MESSAGE}")
    }
}

impl std::error::Error for RateFetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.cause)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}
