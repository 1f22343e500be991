//! # Stripe Configuration
//!
//! Configuration management for the Stripe adapter.
//! Keys are loaded from environment variables when not supplied explicitly.

use gateway_core::PaymentError;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
pub const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...). `None` defers to
    /// `STRIPE_SECRET_KEY` at first use.
    pub secret_key: Option<String>,

    /// Publishable key (pk_test_... or pk_live_...), served to the browser
    pub publishable_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Read (all optional at this point):
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    /// - `STRIPE_API_BASE_URL`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let publishable_key = env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default();

        let api_base_url = env::var("STRIPE_API_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        if let Some(key) = &secret_key {
            if !key.starts_with("sk_") && !key.starts_with("rk_") {
                tracing::warn!("STRIPE_SECRET_KEY does not look like a Stripe secret key");
            }
        }

        Self {
            secret_key,
            publishable_key,
            api_base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config with explicit values
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        let secret_key: String = secret_key.into();
        Self {
            secret_key: (!secret_key.is_empty()).then_some(secret_key),
            publishable_key: publishable_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .is_some_and(|k| k.starts_with("sk_test_"))
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .is_some_and(|k| k.starts_with("sk_live_"))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Reject an empty secret key.
pub fn validate_secret_key(key: &str) -> Result<(), PaymentError> {
    if key.is_empty() {
        return Err(PaymentError::Configuration(
            "Stripe secret_key must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_modes() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = StripeConfig::new("sk_live_abc123", "pk_live_xyz789");
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_empty_key_means_unset() {
        let config = StripeConfig::new("", "pk_test_xyz789");
        assert!(config.secret_key.is_none());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validate_secret_key() {
        assert!(validate_secret_key("sk_test_1").is_ok());
        let err = validate_secret_key("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_builders() {
        let config = StripeConfig::new("sk_test_1", "pk_test_1")
            .with_api_base_url("http://127.0.0.1:9999")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
