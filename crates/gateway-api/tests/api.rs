//! HTTP-level tests for the browser bridge endpoints, backed by a stub provider.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use gateway_api::{create_router, AppConfig, AppState};
use gateway_core::{
    CheckoutSessionSummary, CreatedPayment, Currency, LineItem, PaymentError,
    PaymentIntentSummary, PaymentProvider, PaymentResult, PaymentSettings,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct StubProvider {
    fail_with: Option<String>,
    checkout_status: String,
    intent_status: String,
    calls: AtomicUsize,
    last_amount: Mutex<Option<(i64, String)>>,
    last_return_url: Mutex<Option<String>>,
}

impl StubProvider {
    fn ok() -> Self {
        Self {
            checkout_status: "complete".to_string(),
            intent_status: "succeeded".to_string(),
            ..Default::default()
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::ok()
        }
    }

    fn check(&self) -> PaymentResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(PaymentError::provider("stub", message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentProvider for StubProvider {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &Currency,
    ) -> PaymentResult<CreatedPayment> {
        self.check()?;
        *self.last_amount.lock().await = Some((amount, currency.as_str().to_string()));
        Ok(CreatedPayment {
            id: "pi_stub".to_string(),
            client_secret: "pi_stub_secret".to_string(),
            status: "requires_payment_method".to_string(),
        })
    }

    async fn create_checkout_session(
        &self,
        _line_items: &[LineItem],
        return_url: Option<&str>,
    ) -> PaymentResult<CreatedPayment> {
        self.check()?;
        *self.last_return_url.lock().await = return_url.map(str::to_string);
        Ok(CreatedPayment {
            id: "cs_stub".to_string(),
            client_secret: "cs_stub_secret".to_string(),
            status: "open".to_string(),
        })
    }

    async fn retrieve_session(&self, _session_id: &str) -> PaymentResult<CheckoutSessionSummary> {
        self.check()?;
        Ok(CheckoutSessionSummary {
            status: self.checkout_status.clone(),
            payment_status: "paid".to_string(),
            customer_email: Some("buyer@example.com".to_string()),
        })
    }

    async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> PaymentResult<PaymentIntentSummary> {
        self.check()?;
        Ok(PaymentIntentSummary {
            id: payment_intent_id.to_string(),
            status: self.intent_status.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: "http://shop.test".to_string(),
        environment: "test".to_string(),
        session_ttl_secs: 60,
        session_sweep_secs: 10,
    }
}

fn default_settings() -> PaymentSettings {
    let mut settings = PaymentSettings::new().with_base_url("http://shop.test");
    settings
        .set_payment_defaults(1099, Currency::new("usd").unwrap(), "/checkout/complete")
        .unwrap();
    settings.set_checkout_defaults(Some(vec![LineItem::price("price_123", 1)]), None);
    settings
}

fn server_with(provider: Arc<StubProvider>, settings: PaymentSettings) -> (TestServer, AppState) {
    let state = AppState::from_parts(test_config(), provider, settings, "pk_test_stub");
    let server = TestServer::new(create_router(state.clone())).unwrap();
    (server, state)
}

#[tokio::test]
async fn test_health() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider"], "stub");

    server.get("/").await.assert_status_ok();
}

#[tokio::test]
async fn test_create_payment_intent_uses_defaults() {
    let provider = Arc::new(StubProvider::ok());
    let (server, state) = server_with(provider.clone(), default_settings());

    let response = server
        .post("/api/stripe/create-payment-intent")
        .add_header("x-payment-session", "user-1")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["client_secret"], "pi_stub_secret");
    assert_eq!(response.header("x-payment-session"), "user-1");
    assert_eq!(
        *provider.last_amount.lock().await,
        Some((1099, "usd".to_string()))
    );

    let session = state.orchestrator.session_state("user-1").await;
    assert_eq!(session.status.as_str(), "processing");
    assert_eq!(session.client_secret, "pi_stub_secret");
}

#[tokio::test]
async fn test_create_payment_intent_with_body() {
    let provider = Arc::new(StubProvider::ok());
    let (server, _) = server_with(provider.clone(), default_settings());

    server
        .post("/api/stripe/create-payment-intent")
        .json(&json!({"amount": 2500, "currency": "EUR"}))
        .await
        .assert_status_ok();

    assert_eq!(
        *provider.last_amount.lock().await,
        Some((2500, "eur".to_string()))
    );
}

#[tokio::test]
async fn test_create_payment_intent_without_amount_is_bad_request() {
    let provider = Arc::new(StubProvider::ok());
    let (server, state) = server_with(provider.clone(), PaymentSettings::new());

    let response = server
        .post("/api/stripe/create-payment-intent")
        .add_header("x-payment-session", "user-2")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Amount is required");
    assert_eq!(body["code"], 400);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

    let session = state.orchestrator.session_state("user-2").await;
    assert_eq!(session.status.as_str(), "failed");
    assert_eq!(session.error_message, "Amount is required");
}

#[tokio::test]
async fn test_invalid_currency_and_body_are_bad_requests() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    server
        .post("/api/stripe/create-payment-intent")
        .json(&json!({"amount": 100, "currency": "dollars"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/stripe/create-payment-intent")
        .text("{not json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_failure_is_server_error() {
    let (server, state) = server_with(
        Arc::new(StubProvider::failing("Your card was declined.")),
        default_settings(),
    );

    let response = server
        .post("/api/stripe/create-payment-intent")
        .add_header("x-payment-session", "user-3")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Your card was declined.");

    let session = state.orchestrator.session_state("user-3").await;
    assert_eq!(session.status.as_str(), "failed");
    assert!(session.client_secret.is_empty());
}

#[tokio::test]
async fn test_create_checkout_session_passes_return_url() {
    let provider = Arc::new(StubProvider::ok());
    let (server, _) = server_with(provider.clone(), default_settings());

    let response = server.post("/api/stripe/create-checkout-session").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["client_secret"], "cs_stub_secret");

    assert_eq!(
        provider.last_return_url.lock().await.as_deref(),
        Some("http://shop.test/checkout/complete?session_id={CHECKOUT_SESSION_ID}")
    );
}

#[tokio::test]
async fn test_create_checkout_session_without_items_is_bad_request() {
    let provider = Arc::new(StubProvider::ok());
    let (server, _) = server_with(provider.clone(), PaymentSettings::new());

    let response = server
        .post("/api/stripe/create-checkout-session")
        .json(&json!({"line_items": []}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Line items are required");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_session_status_complete() {
    let (server, state) = server_with(Arc::new(StubProvider::ok()), default_settings());

    let response = server
        .get("/api/stripe/session-status")
        .add_query_param("session_id", "cs_stub")
        .add_header("x-payment-session", "user-4")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "complete");
    assert_eq!(body["payment_status"], "paid");
    assert_eq!(body["customer_email"], "buyer@example.com");

    let session = state.orchestrator.session_state("user-4").await;
    assert_eq!(session.status.as_str(), "succeeded");
    assert_eq!(session.customer_email, "buyer@example.com");
}

#[tokio::test]
async fn test_session_status_open_marks_failed() {
    let provider = StubProvider {
        checkout_status: "open".to_string(),
        ..StubProvider::ok()
    };
    let (server, state) = server_with(Arc::new(provider), default_settings());

    server
        .get("/api/stripe/session-status")
        .add_query_param("session_id", "cs_stub")
        .add_header("x-payment-session", "user-5")
        .await
        .assert_status_ok();

    let session = state.orchestrator.session_state("user-5").await;
    assert_eq!(session.status.as_str(), "failed");
    assert_eq!(session.error_message, "Payment was not completed");
}

#[tokio::test]
async fn test_session_status_requires_session_id() {
    let provider = Arc::new(StubProvider::ok());
    let (server, _) = server_with(provider.clone(), default_settings());

    let response = server.get("/api/stripe/session-status").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "session_id is required");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_payment_status_lookup() {
    let (server, state) = server_with(Arc::new(StubProvider::ok()), default_settings());

    let response = server
        .get("/api/stripe/payment-status")
        .add_query_param("payment_intent", "pi_123")
        .add_header("x-payment-session", "user-6")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["payment_intent"], "pi_123");
    assert_eq!(body["status"], "succeeded");

    let session = state.orchestrator.session_state("user-6").await;
    assert_eq!(session.status.as_str(), "succeeded");

    server
        .get("/api/stripe/payment-status")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callbacks_and_reset() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    server
        .post("/api/stripe/create-payment-intent")
        .add_header("x-payment-session", "user-7")
        .await
        .assert_status_ok();

    let response = server
        .post("/api/stripe/payment-error")
        .add_header("x-payment-session", "user-7")
        .json(&json!({"error_message": "Card declined"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error_message"], "Card declined");
    assert_eq!(body["client_secret"], "");

    let response = server
        .post("/api/stripe/payment-success")
        .add_header("x-payment-session", "user-7")
        .json(&json!({"payment_intent_id": "pi_stub"}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["status"], "succeeded");
    assert_eq!(body["error_message"], "");

    let response = server
        .post("/api/stripe/reset")
        .add_header("x-payment-session", "user-7")
        .await;
    let body: Value = response.json();
    assert_eq!(body["status"], "idle");

    let response = server
        .get("/api/stripe/state")
        .add_header("x-payment-session", "user-7")
        .await;
    let body: Value = response.json();
    assert_eq!(body["status"], "idle");
    assert_eq!(body["client_secret"], "");
}

#[tokio::test]
async fn test_empty_error_message_defaults() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    let response = server.post("/api/stripe/payment-error").await;
    let body: Value = response.json();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error_message"], "Payment failed");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (server, _) = server_with(
        Arc::new(StubProvider::failing("boom")),
        default_settings(),
    );

    server
        .post("/api/stripe/create-payment-intent")
        .add_header("x-payment-session", "alice")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let bob: Value = server
        .get("/api/stripe/state")
        .add_header("x-payment-session", "bob")
        .await
        .json();
    assert_eq!(bob["status"], "idle");

    let alice: Value = server
        .get("/api/stripe/state")
        .add_header("x-payment-session", "alice")
        .await
        .json();
    assert_eq!(alice["status"], "failed");
}

#[tokio::test]
async fn test_minted_session_header_round_trip() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    let response = server.post("/api/stripe/create-payment-intent").await;
    response.assert_status_ok();
    let minted = response
        .header("x-payment-session")
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&minted).is_ok());

    let state: Value = server
        .get("/api/stripe/state")
        .add_header("x-payment-session", minted.as_str())
        .await
        .json();
    assert_eq!(state["status"], "processing");
    assert_eq!(state["client_secret"], "pi_stub_secret");
}

#[tokio::test]
async fn test_config_endpoint() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    let response = server.get("/api/stripe/config").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["publishable_key"], "pk_test_stub");
    assert_eq!(body["elements"]["mode"], "payment");
    assert_eq!(body["elements"]["amount"], 1099);
    assert_eq!(body["elements"]["currency"], "usd");
}

#[tokio::test]
async fn test_config_endpoint_applies_elements_settings() {
    let mut settings = default_settings();
    settings
        .apply_toml(
            r##"
[elements]
locale = "fr"
loader = "never"

[elements.appearance]
theme = "night"

[elements.appearance.variables]
colorPrimary = "#0570de"
"##,
        )
        .unwrap();
    let (server, _) = server_with(Arc::new(StubProvider::ok()), settings);

    let body: Value = server.get("/api/stripe/config").await.json();
    let elements = &body["elements"];
    assert_eq!(elements["mode"], "payment");
    assert_eq!(elements["appearance"]["theme"], "night");
    assert_eq!(elements["appearance"]["variables"]["colorPrimary"], "#0570de");
    assert_eq!(elements["locale"], "fr");
    assert_eq!(elements["loader"], "never");
}

#[tokio::test]
async fn test_config_endpoint_uses_in_flight_intent() {
    let (server, _) = server_with(Arc::new(StubProvider::ok()), default_settings());

    server
        .post("/api/stripe/create-payment-intent")
        .add_header("x-payment-session", "user-8")
        .await
        .assert_status_ok();

    let body: Value = server
        .get("/api/stripe/config")
        .add_header("x-payment-session", "user-8")
        .await
        .json();
    assert_eq!(body["elements"]["clientSecret"], "pi_stub_secret");
    assert!(body["elements"].get("mode").is_none());

    // Other users still get deferred-intent options
    let body: Value = server
        .get("/api/stripe/config")
        .add_header("x-payment-session", "user-9")
        .await
        .json();
    assert_eq!(body["elements"]["mode"], "payment");
    assert!(body["elements"].get("clientSecret").is_none());
}
