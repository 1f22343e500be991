//! # Elements Options
//!
//! Builds the `options` object handed to Stripe's `<Elements>` provider in
//! the browser. Only fields that were set are emitted, under Stripe's
//! documented (camelCase) names.

use crate::currency::Currency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for the Elements provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementsOptions {
    /// `payment`, `subscription` or `setup` (deferred-intent mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<Appearance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// `auto`, `always` or `never`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
}

impl ElementsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deferred-intent options: the intent is created only when the
    /// customer confirms.
    pub fn deferred(amount: i64, currency: Currency) -> Self {
        Self {
            mode: Some("payment".to_string()),
            amount: Some(amount),
            currency: Some(currency),
            ..Self::default()
        }
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_loader(mut self, loader: impl Into<String>) -> Self {
        self.loader = Some(loader.into());
        self
    }

    /// Overlay the integrator's appearance, locale and loader choices.
    pub fn with_settings(self, settings: &ElementsSettings) -> Self {
        let mut options = self;
        if let Some(appearance) = &settings.appearance {
            options = options.with_appearance(appearance.clone());
        }
        if let Some(locale) = &settings.locale {
            options = options.with_locale(locale.clone());
        }
        if let Some(loader) = &settings.loader {
            options = options.with_loader(loader.clone());
        }
        options
    }

    /// Serialise to a JSON object (empty object when nothing is set).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

/// Look-and-feel options the integrator configures once, under the
/// `[elements]` table of the settings file. Keys inside `appearance` use
/// Stripe's camelCase names (`colorPrimary`, `disableAnimations`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ElementsSettings {
    #[serde(default)]
    pub appearance: Option<Appearance>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub loader: Option<String>,
}

/// Appearance API configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    /// `stripe`, `night` or `flat`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<AppearanceVariables>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<BTreeMap<String, BTreeMap<String, String>>>,
    /// `above` or `floating`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_animations: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_box_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_outline: Option<String>,
}
