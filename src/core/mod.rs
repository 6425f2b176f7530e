//! Core conversion logic and abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod rates;
pub mod session;

// Re-export main types for cleaner imports
pub use conversion::{ConversionResult, convert};
pub use currency::{Currency, CurrencySelection};
pub use rates::{RateFetchFailure, RateProvider, RateState, RateTable};
pub use session::Session;
