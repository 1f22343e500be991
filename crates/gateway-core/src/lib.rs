//! # gateway-core
//!
//! Core types and traits for the elements-gateway payment-session service.
//!
//! This crate provides:
//! - `PaymentProvider` trait for upstream payment APIs
//! - `PaymentSession` and `PaymentStatus`, the per-user payment state machine
//! - `SessionStore` for per-user session state
//! - `PaymentSettings` for process-wide defaults
//! - `PaymentOrchestrator`, the create/confirm/status handlers
//! - `ElementsOptions` for the browser-side Elements provider
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use gateway_core::{PaymentOrchestrator, PaymentSettings, Currency};
//!
//! let mut settings = PaymentSettings::new();
//! settings.set_payment_defaults(1099, Currency::new("usd")?, "/checkout/complete")?;
//!
//! let orchestrator = PaymentOrchestrator::new(provider, Arc::new(settings));
//! let client_secret = orchestrator.create_intent("user-session-1", None, None).await?;
//! ```

pub mod currency;
pub mod elements;
pub mod error;
pub mod orchestrator;
pub mod payment;
pub mod provider;
pub mod session;
pub mod settings;
pub mod store;
pub mod urls;

// Re-exports for convenience
pub use currency::Currency;
pub use elements::{Appearance, AppearanceVariables, ElementsOptions, ElementsSettings};
pub use error::{PaymentError, PaymentResult};
pub use orchestrator::PaymentOrchestrator;
pub use payment::{CheckoutSessionSummary, CreatedPayment, LineItem, PaymentIntentSummary};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
pub use session::{PaymentSession, PaymentStatus};
pub use settings::{PaymentSettings, SettingsFile};
pub use store::{SessionId, SessionStore};
pub use urls::{absolute_url, with_session_placeholder, CHECKOUT_SESSION_ID_PLACEHOLDER};
