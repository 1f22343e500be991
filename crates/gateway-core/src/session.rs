//! # Payment Session State
//!
//! Per-user payment state and its transitions.
//!
//! ```text
//!   idle ──create──▶ processing ──success──▶ succeeded
//!     │                  │
//!     └──────fail────────┴──────error──────▶ failed
//!
//!   any ──reset──▶ idle
//! ```
//!
//! Callbacks are permissive: `succeed` and `fail` are accepted from any
//! state, in any order, any number of times.

use crate::payment::{CheckoutSessionSummary, CreatedPayment, PaymentIntentSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing created yet, or reset
    #[default]
    Idle,
    /// Intent or session created, waiting on the customer or the provider
    Processing,
    /// Payment completed
    Succeeded,
    /// Creation or confirmation failed
    Failed,
}

impl PaymentStatus {
    /// Map a provider status for a freshly created intent or session.
    ///
    /// Everything that is neither terminal-good nor terminal-bad
    /// (`requires_payment_method`, `requires_action`, `open`, ...) is `Processing`.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "succeeded" | "complete" => PaymentStatus::Succeeded,
            "failed" | "canceled" | "expired" => PaymentStatus::Failed,
            _ => PaymentStatus::Processing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Idle => "idle",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state for one user session.
///
/// `client_secret` is only non-empty while processing or succeeded;
/// `error_message` is only non-empty while failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub client_secret: String,
    pub status: PaymentStatus,
    pub error_message: String,
    #[serde(default)]
    pub customer_email: String,
    /// Id of the intent or checkout session most recently created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for PaymentSession {
    fn default() -> Self {
        Self {
            client_secret: String::new(),
            status: PaymentStatus::Idle,
            error_message: String::new(),
            customer_email: String::new(),
            provider_id: None,
            updated_at: Utc::now(),
        }
    }
}

impl PaymentSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Store a freshly created intent or checkout session.
    pub fn begin(&mut self, created: &CreatedPayment) {
        match PaymentStatus::from_provider(&created.status) {
            PaymentStatus::Failed => {
                self.fail(format!("Payment {} returned status {}", created.id, created.status));
            }
            status => {
                self.client_secret = created.client_secret.clone();
                self.status = status;
                self.error_message.clear();
            }
        }
        self.provider_id = Some(created.id.clone());
        self.touch();
    }

    /// Mark the payment as succeeded and clear any error.
    pub fn succeed(&mut self) {
        self.status = PaymentStatus::Succeeded;
        self.error_message.clear();
        self.touch();
    }

    /// Mark the payment as failed. An empty message becomes `"Payment failed"`.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message: String = message.into();
        self.status = PaymentStatus::Failed;
        self.error_message = if message.is_empty() {
            "Payment failed".to_string()
        } else {
            message
        };
        self.client_secret.clear();
        self.touch();
    }

    /// Back to a clean idle state.
    pub fn reset(&mut self) {
        self.client_secret.clear();
        self.status = PaymentStatus::Idle;
        self.error_message.clear();
        self.customer_email.clear();
        self.provider_id = None;
        self.touch();
    }

    /// Write back the result of a checkout-session lookup.
    ///
    /// Never moves the session into `Processing`.
    pub fn apply_checkout_summary(&mut self, summary: &CheckoutSessionSummary) {
        match summary.status.as_str() {
            "complete" => {
                self.succeed();
                if let Some(email) = &summary.customer_email {
                    self.customer_email = email.clone();
                }
            }
            "open" => self.fail("Payment was not completed"),
            "expired" => self.fail("Checkout session expired"),
            other => self.fail(format!("Unexpected checkout session status: {}", other)),
        }
    }

    /// Write back the result of a payment-intent lookup.
    pub fn apply_intent_summary(&mut self, summary: &PaymentIntentSummary) {
        match summary.status.as_str() {
            "succeeded" => self.succeed(),
            "requires_payment_method" => {
                self.fail("Payment failed. Please try another payment method.")
            }
            "canceled" => self.fail("Payment was canceled"),
            _ => {
                self.status = PaymentStatus::Processing;
                self.error_message.clear();
                self.touch();
            }
        }
        self.provider_id = Some(summary.id.clone());
    }

    /// Check the secret/error invariants hold.
    pub fn is_consistent(&self) -> bool {
        let secret_ok = self.client_secret.is_empty()
            || matches!(self.status, PaymentStatus::Processing | PaymentStatus::Succeeded);
        let error_ok = self.error_message.is_empty() || self.status == PaymentStatus::Failed;
        secret_ok && error_ok
    }
}
