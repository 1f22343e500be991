//! # Lazy Client Cell
//!
//! Holds the configured secret key and the Stripe client built from it.
//! The client is built on first [`StripeClientCell::get`] under a mutex, so
//! concurrent first requests construct it once. Setting a new key drops the
//! cached client and the next `get` rebuilds it.

use crate::client::StripeApiClient;
use crate::config::{validate_secret_key, StripeConfig};
use gateway_core::{PaymentError, PaymentResult};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Default)]
struct CellState {
    secret_key: Option<String>,
    client: Option<Arc<StripeApiClient>>,
}

#[derive(Debug)]
pub struct StripeClientCell {
    config: StripeConfig,
    state: Mutex<CellState>,
}

impl StripeClientCell {
    pub fn new(config: StripeConfig) -> Self {
        let state = CellState {
            secret_key: config.secret_key.clone(),
            client: None,
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Replace the secret key and invalidate the cached client.
    pub async fn set_secret_key(&self, key: impl Into<String>) -> PaymentResult<()> {
        let key: String = key.into();
        validate_secret_key(&key)?;
        let mut state = self.state.lock().await;
        state.secret_key = Some(key);
        state.client = None;
        Ok(())
    }

    /// Whether a key is configured explicitly or via `STRIPE_SECRET_KEY`.
    pub async fn has_secret_key(&self) -> bool {
        self.state.lock().await.secret_key.is_some() || env_secret_key().is_some()
    }

    /// Whether a client has been built and cached.
    pub async fn is_initialized(&self) -> bool {
        self.state.lock().await.client.is_some()
    }

    /// Get the shared client, building it on first use.
    pub async fn get(&self) -> PaymentResult<Arc<StripeApiClient>> {
        let mut state = self.state.lock().await;
        if let Some(client) = &state.client {
            return Ok(client.clone());
        }

        let key = state
            .secret_key
            .clone()
            .or_else(env_secret_key)
            .ok_or_else(|| {
                PaymentError::Configuration(
                    "STRIPE_SECRET_KEY must be configured or set as an environment variable"
                        .to_string(),
                )
            })?;

        let client = Arc::new(StripeApiClient::new(key, &self.config)?);
        info!("Stripe client initialized");
        state.client = Some(client.clone());
        Ok(client)
    }
}

fn env_secret_key() -> Option<String> {
    std::env::var("STRIPE_SECRET_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}
