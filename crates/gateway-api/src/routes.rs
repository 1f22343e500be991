//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::session::SESSION_HEADER;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Browser bridge (`/api/stripe`):
///   - POST /create-payment-intent - Create PaymentIntent, returns client_secret
///   - POST /create-checkout-session - Create embedded Checkout Session
///   - GET  /session-status?session_id= - Checkout return page lookup
///   - GET  /payment-status?payment_intent= - Express checkout return page lookup
///   - POST /payment-success, /payment-error - Confirmation callbacks
///   - POST /reset - Reset the caller's payment session
///   - GET  /state - Current payment session state
///   - GET  /config - Publishable key and Elements options
///
/// - Health:
///   - GET /health, GET /
pub fn create_router(state: AppState) -> Router {
    // The bridge runs in the page's origin; it must be able to read the
    // session header back.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([SESSION_HEADER]);

    let stripe_routes = Router::new()
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .route("/create-checkout-session", post(handlers::create_checkout_session))
        .route("/session-status", get(handlers::session_status))
        .route("/payment-status", get(handlers::payment_status))
        .route("/payment-success", post(handlers::payment_success))
        .route("/payment-error", post(handlers::payment_error))
        .route("/reset", post(handlers::reset_payment))
        .route("/state", get(handlers::session_state))
        .route("/config", get(handlers::stripe_config));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/stripe", stripe_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
