//! # Request Handlers
//!
//! Axum request handlers for the payment API.
//! Each handler resolves the caller's payment session and delegates to the
//! [`PaymentOrchestrator`](gateway_core::PaymentOrchestrator); no business
//! logic lives here.

use crate::session::PaymentSessionId;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::{Currency, LineItem, PaymentError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::instrument;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request (body optional; defaults apply)
#[derive(Debug, Default, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in smallest currency unit
    #[serde(default)]
    pub amount: Option<i64>,
    /// Three-letter currency code
    #[serde(default)]
    pub currency: Option<String>,
}

/// Create checkout session request (body optional; defaults apply)
#[derive(Debug, Default, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    #[serde(default)]
    pub line_items: Option<Vec<LineItem>>,
}

/// Client secret response
#[derive(Debug, Serialize)]
pub struct ClientSecretResponse {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionStatusQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Checkout session lookup response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub status: String,
    pub payment_status: String,
    pub customer_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusQuery {
    #[serde(default)]
    pub payment_intent: Option<String>,
}

/// Payment intent lookup response
#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    pub payment_intent: String,
    pub status: String,
}

/// Browser callback after successful confirmation
#[derive(Debug, Default, Deserialize)]
pub struct PaymentSuccessRequest {
    #[serde(default)]
    pub payment_intent_id: String,
}

/// Browser callback after failed confirmation
#[derive(Debug, Default, Deserialize)]
pub struct PaymentErrorRequest {
    #[serde(default)]
    pub error_message: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn payment_error_to_response(err: &PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.message(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Parse an optional JSON body; an empty body yields the default.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, PaymentError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| PaymentError::Validation(format!("Invalid JSON body: {}", e)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "elements-gateway",
        "provider": state.orchestrator.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Publishable key and Elements options for the browser
pub async fn stripe_config(State(state): State<AppState>, sid: PaymentSessionId) -> Response {
    let session = state.orchestrator.session_state(sid.as_str()).await;
    sid.respond(Json(serde_json::json!({
        "publishable_key": state.publishable_key,
        "elements": state.elements_options(&session).to_json(),
    })))
}

/// Create a payment intent
#[instrument(skip(state, body), fields(session = %sid.id))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    sid: PaymentSessionId,
    body: Bytes,
) -> Response {
    let request: CreatePaymentIntentRequest = match parse_body(&body) {
        Ok(r) => r,
        Err(e) => return sid.respond(payment_error_to_response(&e)),
    };
    let currency = match request.currency.as_deref().map(Currency::new).transpose() {
        Ok(c) => c,
        Err(e) => return sid.respond(payment_error_to_response(&e)),
    };

    match state
        .orchestrator
        .create_intent(sid.as_str(), request.amount, currency)
        .await
    {
        Ok(client_secret) => sid.respond(Json(ClientSecretResponse { client_secret })),
        Err(e) => sid.respond(payment_error_to_response(&e)),
    }
}

/// Create an embedded checkout session
#[instrument(skip(state, body), fields(session = %sid.id))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    sid: PaymentSessionId,
    body: Bytes,
) -> Response {
    let request: CreateCheckoutSessionRequest = match parse_body(&body) {
        Ok(r) => r,
        Err(e) => return sid.respond(payment_error_to_response(&e)),
    };

    match state
        .orchestrator
        .create_checkout_session(sid.as_str(), request.line_items)
        .await
    {
        Ok(client_secret) => sid.respond(Json(ClientSecretResponse { client_secret })),
        Err(e) => sid.respond(payment_error_to_response(&e)),
    }
}

/// Look up a checkout session for the return page
#[instrument(skip(state), fields(session = %sid.id))]
pub async fn session_status(
    State(state): State<AppState>,
    sid: PaymentSessionId,
    Query(query): Query<SessionStatusQuery>,
) -> Response {
    let checkout_session_id = query.session_id.unwrap_or_default();

    match state
        .orchestrator
        .get_session_status(sid.as_str(), &checkout_session_id)
        .await
    {
        Ok(summary) => sid.respond(Json(SessionStatusResponse {
            status: summary.status,
            payment_status: summary.payment_status,
            customer_email: summary.customer_email,
        })),
        Err(e) => sid.respond(payment_error_to_response(&e)),
    }
}

/// Look up a payment intent for the express checkout return page
#[instrument(skip(state), fields(session = %sid.id))]
pub async fn payment_status(
    State(state): State<AppState>,
    sid: PaymentSessionId,
    Query(query): Query<PaymentStatusQuery>,
) -> Response {
    let payment_intent = query.payment_intent.unwrap_or_default();

    match state
        .orchestrator
        .get_payment_status(sid.as_str(), &payment_intent)
        .await
    {
        Ok(summary) => sid.respond(Json(PaymentStatusResponse {
            payment_intent: summary.id,
            status: summary.status,
        })),
        Err(e) => sid.respond(payment_error_to_response(&e)),
    }
}

/// Browser reports a confirmed payment
pub async fn payment_success(
    State(state): State<AppState>,
    sid: PaymentSessionId,
    body: Bytes,
) -> Response {
    let request: PaymentSuccessRequest = match parse_body(&body) {
        Ok(r) => r,
        Err(e) => return sid.respond(payment_error_to_response(&e)),
    };
    let session = state
        .orchestrator
        .handle_payment_success(sid.as_str(), &request.payment_intent_id)
        .await;
    sid.respond(Json(session))
}

/// Browser reports a failed confirmation
pub async fn payment_error(
    State(state): State<AppState>,
    sid: PaymentSessionId,
    body: Bytes,
) -> Response {
    let request: PaymentErrorRequest = match parse_body(&body) {
        Ok(r) => r,
        Err(e) => return sid.respond(payment_error_to_response(&e)),
    };
    let session = state
        .orchestrator
        .handle_payment_error(sid.as_str(), &request.error_message)
        .await;
    sid.respond(Json(session))
}

/// Reset the caller's payment session
pub async fn reset_payment(State(state): State<AppState>, sid: PaymentSessionId) -> Response {
    let session = state.orchestrator.reset_payment(sid.as_str()).await;
    sid.respond(Json(session))
}

/// Current payment session state
pub async fn session_state(State(state): State<AppState>, sid: PaymentSessionId) -> Response {
    let session = state.orchestrator.session_state(sid.as_str()).await;
    sid.respond(Json(session))
}
