//! # Stripe Provider
//!
//! [`PaymentProvider`] implementation over the Stripe REST API:
//! payment intents for Express Checkout / Payment Element, and embedded
//! Checkout Sessions for hosted checkout.

use crate::cell::StripeClientCell;
use crate::client::{StripeCheckoutSession, StripePaymentIntent};
use crate::config::StripeConfig;
use crate::form::FormBuilder;
use async_trait::async_trait;
use gateway_core::{
    CheckoutSessionSummary, CreatedPayment, Currency, LineItem, PaymentError, PaymentIntentSummary,
    PaymentProvider, PaymentResult,
};
use tracing::{info, instrument};

pub struct StripeProvider {
    cell: StripeClientCell,
}

impl StripeProvider {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            cell: StripeClientCell::new(config),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(StripeConfig::from_env())
    }

    pub fn cell(&self) -> &StripeClientCell {
        &self.cell
    }

    /// Replace the secret key; the client is rebuilt on next use.
    pub async fn set_secret_key(&self, key: impl Into<String>) -> PaymentResult<()> {
        self.cell.set_secret_key(key).await
    }

    pub fn publishable_key(&self) -> &str {
        &self.cell.config().publishable_key
    }

    fn payment_intent_form(amount: i64, currency: &Currency) -> FormBuilder {
        FormBuilder::new()
            .field("amount", amount)
            .field("currency", currency.as_str())
            .field("automatic_payment_methods[enabled]", true)
    }

    fn checkout_session_form(
        line_items: &[LineItem],
        return_url: Option<&str>,
    ) -> PaymentResult<FormBuilder> {
        let items = serde_json::to_value(line_items)
            .map_err(|e| PaymentError::Serialization(e.to_string()))?;

        let form = FormBuilder::new()
            .field("ui_mode", "embedded")
            .field("mode", "payment")
            .json("line_items", &items);

        Ok(match return_url.filter(|u| !u.is_empty()) {
            Some(url) => form.field("return_url", url),
            None => form.field("redirect_on_completion", "never"),
        })
    }
}

/// Stripe object ids are `prefix_` plus alphanumerics. Anything else never
/// reaches the API.
fn check_object_id(kind: &str, id: &str) -> PaymentResult<()> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(PaymentError::Validation(format!("Invalid {} id", kind)));
    }
    Ok(())
}

fn missing_secret(kind: &str, id: &str) -> PaymentError {
    PaymentError::provider("stripe", format!("{} {} has no client_secret", kind, id))
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    #[instrument(skip(self))]
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &Currency,
    ) -> PaymentResult<CreatedPayment> {
        let client = self.cell.get().await?;
        let form = Self::payment_intent_form(amount, currency).build();

        let intent: StripePaymentIntent = client.post_form("/v1/payment_intents", &form).await?;
        info!("Created Stripe PaymentIntent: id={}, status={}", intent.id, intent.status);

        let client_secret = intent
            .client_secret
            .ok_or_else(|| missing_secret("PaymentIntent", &intent.id))?;

        Ok(CreatedPayment {
            id: intent.id,
            client_secret,
            status: intent.status,
        })
    }

    #[instrument(skip(self, line_items), fields(items = line_items.len()))]
    async fn create_checkout_session(
        &self,
        line_items: &[LineItem],
        return_url: Option<&str>,
    ) -> PaymentResult<CreatedPayment> {
        let client = self.cell.get().await?;
        let form = Self::checkout_session_form(line_items, return_url)?.build();

        let session: StripeCheckoutSession =
            client.post_form("/v1/checkout/sessions", &form).await?;
        info!("Created Stripe checkout session: id={}", session.id);

        let client_secret = session
            .client_secret
            .ok_or_else(|| missing_secret("Checkout Session", &session.id))?;

        Ok(CreatedPayment {
            id: session.id,
            client_secret,
            status: session.status.unwrap_or_else(|| "open".to_string()),
        })
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<CheckoutSessionSummary> {
        check_object_id("checkout session", session_id)?;
        let client = self.cell.get().await?;
        let session: StripeCheckoutSession = client
            .get_object("/v1/checkout/sessions", session_id)
            .await?;

        let customer_email = session.email();
        Ok(CheckoutSessionSummary {
            status: session.status.unwrap_or_default(),
            payment_status: session.payment_status.unwrap_or_default(),
            customer_email,
        })
    }

    #[instrument(skip(self))]
    async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> PaymentResult<PaymentIntentSummary> {
        check_object_id("payment intent", payment_intent_id)?;
        let client = self.cell.get().await?;
        let intent: StripePaymentIntent = client
            .get_object("/v1/payment_intents", payment_intent_id)
            .await?;

        Ok(PaymentIntentSummary {
            id: intent.id,
            status: intent.status,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}
