//! # gateway-stripe
//!
//! Stripe provider adapter for elements-gateway.
//!
//! - **StripeProvider** implements `PaymentProvider`:
//!   - `POST /v1/payment_intents` (Express Checkout, Payment Element)
//!   - `POST /v1/checkout/sessions` with `ui_mode=embedded` (Embedded Checkout)
//!   - `GET /v1/checkout/sessions/{id}` and `GET /v1/payment_intents/{id}`
//!     for the return pages
//! - **StripeClientCell** builds the HTTP client lazily from the secret key
//!   and rebuilds it when the key changes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gateway_stripe::StripeProvider;
//! use gateway_core::{Currency, PaymentProvider};
//!
//! let provider = StripeProvider::from_env();
//! let created = provider.create_payment_intent(1099, &Currency::default()).await?;
//!
//! // Hand created.client_secret to stripe.confirmPayment() in the browser
//! ```

pub mod cell;
pub mod client;
pub mod config;
pub mod form;
pub mod provider;

// Re-exports
pub use cell::StripeClientCell;
pub use client::StripeApiClient;
pub use config::StripeConfig;
pub use form::FormBuilder;
pub use provider::StripeProvider;
