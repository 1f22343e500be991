//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment orchestrator, configuration, and browser-facing keys.

use gateway_core::{
    BoxedPaymentProvider, ElementsOptions, PaymentOrchestrator, PaymentSession, PaymentSettings,
    PaymentStatus,
};
use gateway_stripe::StripeProvider;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for relative return URLs
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Payment sessions untouched for this long are dropped
    pub session_ttl_secs: u64,
    /// How often stale sessions are swept
    pub session_sweep_secs: u64,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_parse("PORT").unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            session_ttl_secs: env_parse("SESSION_TTL_SECS").unwrap_or(3600),
            session_sweep_secs: env_parse("SESSION_SWEEP_SECS").unwrap_or(300),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Session TTL as a duration. Values too large to represent saturate
    /// instead of wrapping.
    pub fn session_ttl(&self) -> chrono::Duration {
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Create/confirm/status handlers
    pub orchestrator: PaymentOrchestrator,
    /// Publishable key handed to the browser
    pub publishable_key: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let provider = StripeProvider::from_env();
        let publishable_key = provider.publishable_key().to_string();
        let secret_key_present = provider.cell().has_secret_key().await;
        if !secret_key_present {
            tracing::warn!("STRIPE_SECRET_KEY not set; provider calls will fail until it is");
        }

        let mut settings = PaymentSettings::new()
            .with_base_url(config.base_url.clone())
            .with_secret_key_present(secret_key_present);
        load_settings_file(&mut settings)?;

        Ok(Self::from_parts(
            config,
            Arc::new(provider),
            settings,
            publishable_key,
        ))
    }

    /// Assemble state from explicit parts (tests, embedding)
    pub fn from_parts(
        config: AppConfig,
        provider: BoxedPaymentProvider,
        settings: PaymentSettings,
        publishable_key: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator: PaymentOrchestrator::new(provider, Arc::new(settings)),
            publishable_key: publishable_key.into(),
            config,
        }
    }

    /// Options for the browser's `<Elements>` provider.
    ///
    /// A session with a payment intent still in flight gets that intent's
    /// client secret; otherwise the default amount selects deferred-intent
    /// mode. Configured appearance, locale and loader are always applied.
    pub fn elements_options(&self, session: &PaymentSession) -> ElementsOptions {
        let settings = self.orchestrator.settings();
        let in_flight_intent = session.status == PaymentStatus::Processing
            && !session.client_secret.is_empty()
            && session
                .provider_id
                .as_deref()
                .is_some_and(|id| id.starts_with("pi_"));

        let options = if in_flight_intent {
            ElementsOptions::new().with_client_secret(session.client_secret.clone())
        } else if settings.default_amount > 0 {
            ElementsOptions::deferred(settings.default_amount, settings.default_currency.clone())
        } else {
            ElementsOptions::new()
        };
        options.with_settings(&settings.elements)
    }
}

/// Overlay payment defaults from `config/gateway.toml` if one exists
fn load_settings_file(settings: &mut PaymentSettings) -> anyhow::Result<()> {
    let explicit = std::env::var("GATEWAY_CONFIG").ok();
    let config_paths: Vec<String> = match explicit {
        Some(path) => vec![path],
        None => vec![
            "config/gateway.toml".to_string(),
            "../config/gateway.toml".to_string(),
            "../../config/gateway.toml".to_string(),
        ],
    };

    for path in &config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            settings
                .apply_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded payment defaults from {} ({} line items)",
                path,
                settings.default_line_items.len()
            );
            return Ok(());
        }
    }

    tracing::warn!("No gateway settings file found, using built-in defaults");
    Ok(())
}
