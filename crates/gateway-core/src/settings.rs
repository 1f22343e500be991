//! # Payment Settings
//!
//! Process-wide defaults used when a request does not carry its own amount,
//! currency or line items. Assembled once at startup (from code, an optional
//! `config/gateway.toml`, and the environment) and then shared read-only
//! behind an `Arc`.

use crate::currency::Currency;
use crate::elements::ElementsSettings;
use crate::error::{PaymentError, PaymentResult};
use crate::payment::LineItem;
use serde::Deserialize;

/// Defaults for payment intents and checkout sessions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentSettings {
    /// Whether a secret key was configured at startup
    pub secret_key_present: bool,

    /// Default amount in smallest currency unit (0 = none)
    pub default_amount: i64,

    /// Default currency
    pub default_currency: Currency,

    /// Default checkout line items
    pub default_line_items: Vec<LineItem>,

    /// Return URL template (may be relative, may carry the session placeholder)
    pub return_url: String,

    /// Base URL used to absolutise relative return URLs
    pub base_url: Option<String>,

    /// Appearance, locale and loader for the browser's Elements provider
    pub elements: ElementsSettings,
}

/// On-disk shape of `config/gateway.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub default_amount: Option<i64>,
    #[serde(default)]
    pub default_currency: Option<Currency>,
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub elements: Option<ElementsSettings>,
}

impl PaymentSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set payment-intent defaults.
    ///
    /// The return URL is only replaced when `return_url` is non-empty.
    pub fn set_payment_defaults(
        &mut self,
        amount: i64,
        currency: Currency,
        return_url: &str,
    ) -> PaymentResult<()> {
        if amount < 0 {
            return Err(PaymentError::Configuration(format!(
                "Default amount must not be negative, got {}",
                amount
            )));
        }
        self.default_amount = amount;
        self.default_currency = currency;
        if !return_url.is_empty() {
            self.return_url = return_url.to_string();
        }
        Ok(())
    }

    /// Partially update checkout defaults. `None` leaves a field unchanged.
    pub fn set_checkout_defaults(
        &mut self,
        line_items: Option<Vec<LineItem>>,
        return_url: Option<&str>,
    ) {
        if let Some(items) = line_items {
            self.default_line_items = items;
        }
        if let Some(url) = return_url.filter(|u| !u.is_empty()) {
            self.return_url = url.to_string();
        }
    }

    /// Builder: set the base URL for relative return URLs
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = (!base_url.is_empty()).then_some(base_url);
        self
    }

    /// Builder: record whether a secret key was supplied
    pub fn with_secret_key_present(mut self, present: bool) -> Self {
        self.secret_key_present = present;
        self
    }

    /// Overlay a parsed settings file, field by field.
    pub fn apply_file(&mut self, file: SettingsFile) -> PaymentResult<()> {
        if file.default_amount.is_some() || file.default_currency.is_some() {
            let amount = file.default_amount.unwrap_or(self.default_amount);
            let currency = file
                .default_currency
                .unwrap_or_else(|| self.default_currency.clone());
            self.set_payment_defaults(amount, currency, "")?;
        }
        self.set_checkout_defaults(file.line_items, file.return_url.as_deref());
        if let Some(base) = file.base_url.filter(|b| !b.is_empty()) {
            self.base_url = Some(base);
        }
        if let Some(elements) = file.elements {
            self.elements = elements;
        }
        Ok(())
    }

    /// Parse TOML text and overlay it.
    pub fn apply_toml(&mut self, content: &str) -> PaymentResult<()> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e| PaymentError::Configuration(format!("Invalid settings file: {}", e)))?;
        self.apply_file(file)
    }
}
