//! Amount conversion routed through the pivot currency

use std::fmt::Display;
use tracing::debug;

use super::currency::Currency;
use super::rates::RateTable;

/// A converted amount, displayed with exactly two fractional digits.
///
/// Display uses the standard float formatter, so values that are exact binary
/// ties round half to even (0.125 shows as "0.12").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub value: f64,
}

impl ConversionResult {
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // -0.0 would otherwise render as "-0.00"
        let value = if self.value == 0.0 { 0.0 } else { self.value };
        write!(f, "{value:.2}")
    }
}

/// Parses user-entered amount text. Empty or non-finite input yields `None`.
pub fn parse_amount(amount: &str) -> Option<f64> {
    amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Converts `amount` from one currency code to another using USD-quoted rates.
///
/// Returns `None` when the amount is not a usable number or when either code
/// has no rate in `rates`. Arithmetic is plain `f64`.
pub fn convert(amount: &str, from: &str, to: &str, rates: &RateTable) -> Option<ConversionResult> {
    let amount = parse_amount(amount)?;
    let from_rate = rates.get(from)?;
    let to_rate = rates.get(to)?;

    let pivot = Currency::PIVOT.code();
    let value = if from.eq_ignore_ascii_case(pivot) {
        amount * to_rate
    } else if to.eq_ignore_ascii_case(pivot) {
        amount / from_rate
    } else {
        let pivot_amount = amount / from_rate;
        pivot_amount * to_rate
    };

    debug!(%from, %to, amount, value, "Converted amount");
    Some(ConversionResult { value })
}
