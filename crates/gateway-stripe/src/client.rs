//! # Stripe HTTP Client
//!
//! Thin authenticated wrapper over `reqwest` for the handful of Stripe
//! endpoints the gateway needs. Errors are mapped onto [`PaymentError`].

use crate::config::StripeConfig;
use gateway_core::{PaymentError, PaymentResult};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

const PROVIDER: &str = "stripe";

/// Authenticated Stripe API client, built once per secret key
#[derive(Debug, Clone)]
pub struct StripeApiClient {
    client: Client,
    secret_key: String,
    api_base_url: String,
    api_version: String,
}

impl StripeApiClient {
    /// Build a client for `secret_key` using base URL, version and timeout from `config`.
    pub fn new(secret_key: impl Into<String>, config: &StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            secret_key: secret_key.into(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        })
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// URL of one object in a collection. `id` is encoded as a single path
    /// segment, so `/`, `?` and `#` cannot leave the collection.
    fn object_url(&self, collection: &str, id: &str) -> PaymentResult<Url> {
        let mut url = Url::parse(&self.url(collection))
            .map_err(|e| PaymentError::Configuration(format!("Invalid Stripe API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PaymentError::Configuration("Stripe API URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", self.auth_header())
            .header("Stripe-Version", &self.api_version)
    }

    /// POST a form-encoded body and parse the JSON response.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> PaymentResult<T> {
        debug!("POST {} ({} params)", path, form.len());
        let request = self.authorize(self.client.post(self.url(path))).form(form);
        self.send(request).await
    }

    /// GET one object by id, e.g. `get_object("/v1/payment_intents", "pi_123")`.
    pub async fn get_object<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> PaymentResult<T> {
        let url = self.object_url(collection, id)?;
        debug!("GET {}", url.path());
        let request = self.authorize(self.client.get(url));
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PaymentResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::provider(PROVIDER, error_response.error.message));
            }

            return Err(PaymentError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub customer_details: Option<StripeCustomerDetails>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

impl StripeCheckoutSession {
    /// Email the customer entered, or the one the session was created with.
    pub fn email(&self) -> Option<String> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.clone())
            .or_else(|| self.customer_email.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct StripeCustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
