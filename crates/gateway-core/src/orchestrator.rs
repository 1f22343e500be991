//! # Payment Orchestrator
//!
//! Ties a [`PaymentProvider`] to the [`SessionStore`]: validates input,
//! calls the provider, and records the outcome in the caller's session.
//!
//! Every failure path leaves the session `failed` with a message and hands
//! the same error back to the caller. Nothing is retried.

use crate::currency::Currency;
use crate::error::{PaymentError, PaymentResult};
use crate::payment::{CheckoutSessionSummary, LineItem, PaymentIntentSummary};
use crate::provider::BoxedPaymentProvider;
use crate::session::PaymentSession;
use crate::settings::PaymentSettings;
use crate::store::SessionStore;
use crate::urls::{absolute_url, with_session_placeholder};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

#[derive(Clone)]
pub struct PaymentOrchestrator {
    provider: BoxedPaymentProvider,
    settings: Arc<PaymentSettings>,
    sessions: SessionStore,
}

impl PaymentOrchestrator {
    pub fn new(provider: BoxedPaymentProvider, settings: Arc<PaymentSettings>) -> Self {
        Self::with_store(provider, settings, SessionStore::new())
    }

    pub fn with_store(
        provider: BoxedPaymentProvider,
        settings: Arc<PaymentSettings>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            provider,
            settings,
            sessions,
        }
    }

    pub fn settings(&self) -> &PaymentSettings {
        &self.settings
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Create a payment intent and store its client secret in the session.
    ///
    /// `amount` falls back to the configured default when absent or zero,
    /// `currency` when absent. So `Some(0)` charges the default amount when
    /// one is configured, and only fails when none is. A negative amount
    /// always fails without reaching the provider.
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    pub async fn create_intent(
        &self,
        session_id: &str,
        amount: Option<i64>,
        currency: Option<Currency>,
    ) -> PaymentResult<String> {
        let amount = amount
            .filter(|a| *a != 0)
            .unwrap_or(self.settings.default_amount);
        let currency = currency.unwrap_or_else(|| self.settings.default_currency.clone());

        if amount <= 0 {
            return Err(self
                .record_failure(session_id, PaymentError::Validation("Amount is required".to_string()))
                .await);
        }

        match self.provider.create_payment_intent(amount, &currency).await {
            Ok(created) => {
                info!("PaymentIntent created: {}", created.id);
                let session = self.sessions.update(session_id, |s| s.begin(&created)).await;
                Ok(session.client_secret)
            }
            Err(e) => {
                error!("Failed to create PaymentIntent: {}", e);
                Err(self.record_failure(session_id, e).await)
            }
        }
    }

    /// Create an embedded checkout session from the given or default line items.
    #[instrument(skip(self, line_items), fields(provider = self.provider.provider_name()))]
    pub async fn create_checkout_session(
        &self,
        session_id: &str,
        line_items: Option<Vec<LineItem>>,
    ) -> PaymentResult<String> {
        let items = match line_items {
            Some(items) if !items.is_empty() => items,
            _ => self.settings.default_line_items.clone(),
        };

        if items.is_empty() {
            return Err(self
                .record_failure(
                    session_id,
                    PaymentError::Validation("Line items are required".to_string()),
                )
                .await);
        }

        let return_url = self.return_url();

        match self
            .provider
            .create_checkout_session(&items, return_url.as_deref())
            .await
        {
            Ok(created) => {
                info!("Checkout Session created: {}", created.id);
                let session = self.sessions.update(session_id, |s| s.begin(&created)).await;
                Ok(session.client_secret)
            }
            Err(e) => {
                error!("Failed to create Checkout Session: {}", e);
                Err(self.record_failure(session_id, e).await)
            }
        }
    }

    /// Called by the browser after a successful client-side confirmation.
    pub async fn handle_payment_success(
        &self,
        session_id: &str,
        payment_intent_id: &str,
    ) -> PaymentSession {
        info!("Payment succeeded: {}", payment_intent_id);
        self.sessions.update(session_id, |s| s.succeed()).await
    }

    /// Called by the browser when client-side confirmation fails.
    pub async fn handle_payment_error(
        &self,
        session_id: &str,
        error_message: &str,
    ) -> PaymentSession {
        warn!("Payment failed: {}", error_message);
        self.sessions
            .update(session_id, |s| s.fail(error_message))
            .await
    }

    /// Reset the session for a new transaction.
    pub async fn reset_payment(&self, session_id: &str) -> PaymentSession {
        self.sessions.update(session_id, |s| s.reset()).await
    }

    /// Look up a checkout session (return page) and record the outcome.
    #[instrument(skip(self))]
    pub async fn get_session_status(
        &self,
        session_id: &str,
        checkout_session_id: &str,
    ) -> PaymentResult<CheckoutSessionSummary> {
        if checkout_session_id.is_empty() {
            return Err(self
                .record_failure(
                    session_id,
                    PaymentError::Validation("session_id is required".to_string()),
                )
                .await);
        }

        match self.provider.retrieve_session(checkout_session_id).await {
            Ok(summary) => {
                info!(
                    "Checkout Session {} status={} payment_status={}",
                    checkout_session_id, summary.status, summary.payment_status
                );
                self.sessions
                    .update(session_id, |s| s.apply_checkout_summary(&summary))
                    .await;
                Ok(summary)
            }
            Err(e) => {
                error!("Failed to retrieve Checkout Session: {}", e);
                Err(self.record_failure(session_id, e).await)
            }
        }
    }

    /// Look up a payment intent (express checkout return page) and record the outcome.
    #[instrument(skip(self))]
    pub async fn get_payment_status(
        &self,
        session_id: &str,
        payment_intent_id: &str,
    ) -> PaymentResult<PaymentIntentSummary> {
        if payment_intent_id.is_empty() {
            return Err(self
                .record_failure(
                    session_id,
                    PaymentError::Validation("payment_intent is required".to_string()),
                )
                .await);
        }

        match self.provider.retrieve_payment_intent(payment_intent_id).await {
            Ok(summary) => {
                self.sessions
                    .update(session_id, |s| s.apply_intent_summary(&summary))
                    .await;
                Ok(summary)
            }
            Err(e) => {
                error!("Failed to retrieve PaymentIntent: {}", e);
                Err(self.record_failure(session_id, e).await)
            }
        }
    }

    /// Current state of a session.
    pub async fn session_state(&self, session_id: &str) -> PaymentSession {
        self.sessions.snapshot(session_id).await
    }

    /// Return URL sent to the provider for checkout sessions, if one is configured.
    pub fn return_url(&self) -> Option<String> {
        if self.settings.return_url.is_empty() {
            return None;
        }
        let templated = with_session_placeholder(&self.settings.return_url);
        Some(absolute_url(self.settings.base_url.as_deref(), &templated))
    }

    async fn record_failure(&self, session_id: &str, err: PaymentError) -> PaymentError {
        self.sessions
            .update(session_id, |s| s.fail(err.message()))
            .await;
        err
    }
}
