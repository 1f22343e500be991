//! # gateway-api
//!
//! HTTP API layer for elements-gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints the browser-side Stripe bridge calls
//! - Per-user payment session resolution via the `x-payment-session` header
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/stripe/create-payment-intent` | Create PaymentIntent |
//! | POST | `/api/stripe/create-checkout-session` | Create embedded Checkout Session |
//! | GET | `/api/stripe/session-status` | Checkout Session status |
//! | GET | `/api/stripe/payment-status` | PaymentIntent status |
//! | POST | `/api/stripe/payment-success` | Confirmation succeeded |
//! | POST | `/api/stripe/payment-error` | Confirmation failed |
//! | POST | `/api/stripe/reset` | Reset payment session |
//! | GET | `/api/stripe/state` | Payment session state |
//! | GET | `/api/stripe/config` | Publishable key + Elements options |

pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;

pub use routes::create_router;
pub use session::{PaymentSessionId, SESSION_HEADER};
pub use state::{AppConfig, AppState};
