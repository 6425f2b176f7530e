//! Supported currencies and the from/to selection

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Ars,
    Bob,
    Brl,
    Clp,
    Cop,
    Usd,
}

impl Currency {
    /// All supported currencies in display order.
    pub const ALL: [Currency; 6] = [
        Currency::Ars,
        Currency::Bob,
        Currency::Brl,
        Currency::Clp,
        Currency::Cop,
        Currency::Usd,
    ];

    /// Every rate from the provider is quoted against this currency.
    pub const PIVOT: Currency = Currency::Usd;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ars => "ARS",
            Currency::Bob => "BOB",
            Currency::Brl => "BRL",
            Currency::Clp => "CLP",
            Currency::Cop => "COP",
            Currency::Usd => "USD",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Ars => "Argentine Peso",
            Currency::Bob => "Bolivian Boliviano",
            Currency::Brl => "Brazilian Real",
            Currency::Clp => "Chilean Peso",
            Currency::Cop => "Colombian Peso",
            Currency::Usd => "US Dollar",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ARS" => Ok(Currency::Ars),
            "BOB" => Ok(Currency::Bob),
            "BRL" => Ok(Currency::Brl),
            "CLP" => Ok(Currency::Clp),
            "COP" => Ok(Currency::Cop),
            "USD" => Ok(Currency::Usd),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

/// Source and target currency picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencySelection {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencySelection {
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

impl Default for CurrencySelection {
    fn default() -> Self {
        Self::new(Currency::Usd, Currency::Ars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_codes() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
        assert_eq!("brl".parse::<Currency>().unwrap(), Currency::Brl);
        assert_eq!(" cop ".parse::<Currency>().unwrap(), Currency::Cop);

        let err = "EUR".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency: EUR");
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Currency::Clp.to_string(), "CLP");
        assert_eq!(Currency::Bob.display_name(), "Bolivian Boliviano");
    }

    #[test]
    fn test_swap_selection() {
        let mut selection = CurrencySelection::new(Currency::Ars, Currency::Brl);
        selection.swap();
        assert_eq!(selection, CurrencySelection::new(Currency::Brl, Currency::Ars));
        selection.swap();
        assert_eq!(selection, CurrencySelection::new(Currency::Ars, Currency::Brl));
    }

    #[test]
    fn test_default_selection_is_usd_to_ars() {
        let selection = CurrencySelection::default();
        assert_eq!(selection.from, Currency::Usd);
        assert_eq!(selection.to, Currency::Ars);
    }

    #[test]
    fn test_serde_as_code() {
        let yaml = serde_yaml::to_string(&Currency::Brl).unwrap();
        assert_eq!(yaml.trim(), "BRL");
        let parsed: Currency = serde_yaml::from_str("clp").unwrap();
        assert_eq!(parsed, Currency::Clp);
        assert!(serde_yaml::from_str::<Currency>("EUR").is_err());
    }
}
