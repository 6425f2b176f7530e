//! Per-session state for one conversion form

use tracing::{debug, info, warn};

use super::conversion::{self, ConversionResult};
use super::currency::{Currency, CurrencySelection};
use super::rates::{FETCH_FAILURE_MESSAGE, RateFetchFailure, RateProvider, RateState};

/// Sets the flag for its lifetime and clears it on drop, so every exit from a
/// fetch (including a dropped future) leaves the session out of loading.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn new(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct Session {
    provider: Box<dyn RateProvider>,
    rates: RateState,
    loading: bool,
    amount: String,
    selection: CurrencySelection,
    result: Option<ConversionResult>,
}

impl Session {
    pub fn new(provider: Box<dyn RateProvider>, selection: CurrencySelection) -> Self {
        Self {
            provider,
            rates: RateState::Unloaded,
            loading: false,
            amount: String::new(),
            selection,
            result: None,
        }
    }

    /// Fetches rates from the provider. Calling it again is the only way to
    /// recover from a failure; nothing is retried automatically.
    pub async fn load_rates(&mut self) -> Result<(), RateFetchFailure> {
        // A result must never outlive the rates it was computed from
        self.result = None;
        let fetched = {
            let _loading = LoadingGuard::new(&mut self.loading);
            self.provider.fetch_rates().await
        };

        match fetched {
            Ok(table) => {
                info!(currencies = table.len(), "Exchange rates loaded");
                self.rates = RateState::Loaded(table);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch exchange rates");
                self.rates = RateState::Failed(FETCH_FAILURE_MESSAGE.to_string());
                Err(RateFetchFailure::new(e))
            }
        }
    }

    pub fn rates(&self) -> &RateState {
        &self.rates
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn selection(&self) -> CurrencySelection {
        self.selection
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
        self.result = None;
    }

    pub fn set_from(&mut self, currency: Currency) {
        self.selection.from = currency;
        self.result = None;
    }

    pub fn set_to(&mut self, currency: Currency) {
        self.selection.to = currency;
        self.result = None;
    }

    /// Exchanges source and target. The previous result is discarded and not
    /// recomputed.
    pub fn swap(&mut self) {
        self.selection.swap();
        self.result = None;
    }

    pub fn can_convert(&self) -> bool {
        !self.loading && !self.amount.is_empty()
    }

    /// Computes and stores the result. Only a loaded rate table is used.
    pub fn convert(&mut self) -> Option<&ConversionResult> {
        self.result = None;
        if !self.can_convert() {
            debug!("Conversion not available");
            return None;
        }
        let table = self.rates.table()?;
        self.result = conversion::convert(
            &self.amount,
            self.selection.from.code(),
            self.selection.to.code(),
            table,
        );
        self.result.as_ref()
    }

    pub fn result_banner(&self) -> Option<String> {
        self.result.as_ref().map(|result| {
            format!(
                "{} {} = {} {}",
                self.amount, self.selection.from, result, self.selection.to
            )
        })
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.rates.error_message()
    }
}
