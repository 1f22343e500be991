//! # Payment Error Types
//!
//! Typed error handling for elements-gateway.
//! All provider and orchestration operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Configuration errors (missing or empty keys, bad defaults file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed caller input (missing amount, empty line items, missing query param)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Provider response could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Shorthand for a Stripe API-level failure
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// True for any failure that came from talking to the upstream provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            PaymentError::Provider { .. } | PaymentError::Network(_) | PaymentError::Serialization(_)
        )
    }

    /// The bare message, without the category prefix.
    ///
    /// This is what lands in a session's `error_message` and in the
    /// `error` field of HTTP error bodies.
    pub fn message(&self) -> &str {
        match self {
            PaymentError::Configuration(m)
            | PaymentError::Validation(m)
            | PaymentError::Network(m)
            | PaymentError::Serialization(m) => m,
            PaymentError::Provider { message, .. } => message,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Validation(_) => 400,
            PaymentError::Configuration(_) => 500,
            PaymentError::Provider { .. } => 500,
            PaymentError::Network(_) => 500,
            PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
