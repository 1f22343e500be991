//! # Currency Codes
//!
//! Three-letter ISO 4217 codes as the provider expects them (lowercase).

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A validated, lowercased three-letter currency code (e.g. `usd`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parse and normalise a currency code.
    pub fn new(code: impl AsRef<str>) -> PaymentResult<Self> {
        let code = code.as_ref().trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::Validation(format!(
                "Currency must be a three-letter code, got {:?}",
                code
            )));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency("usd".to_string())
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::new(value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_uppercase())
    }
}
