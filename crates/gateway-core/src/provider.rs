//! # Payment Provider Trait
//!
//! The seam between the orchestration handlers and an upstream payment API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaymentProvider (trait)                   │
//! │  ├── create_payment_intent()                                │
//! │  ├── create_checkout_session()                              │
//! │  ├── retrieve_session()                                     │
//! │  ├── retrieve_payment_intent()                              │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                ┌───────────┴───────────┐
//!                │                       │
//!        ┌───────┴───────┐       ┌───────┴───────┐
//!        │StripeProvider │       │  test stubs   │
//!        └───────────────┘       └───────────────┘
//! ```
//!
//! Implementations never retry. Creating a payment is not idempotent
//! without an idempotency key, so a retry is always an explicit new call.

use crate::currency::Currency;
use crate::error::PaymentResult;
use crate::payment::{CheckoutSessionSummary, CreatedPayment, LineItem, PaymentIntentSummary};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for `amount` (smallest currency unit, > 0).
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &Currency,
    ) -> PaymentResult<CreatedPayment>;

    /// Create an embedded checkout session for a non-empty set of line items.
    ///
    /// `return_url` is where the provider redirects once the customer is
    /// done; it may carry the `{CHECKOUT_SESSION_ID}` placeholder.
    async fn create_checkout_session(
        &self,
        line_items: &[LineItem],
        return_url: Option<&str>,
    ) -> PaymentResult<CreatedPayment>;

    /// Look up a checkout session by id.
    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<CheckoutSessionSummary>;

    /// Look up a payment intent by id.
    async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> PaymentResult<PaymentIntentSummary>;

    /// Get the provider name (for logging and error attribution).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
