//! # elements-gateway
//!
//! Payment-session service behind Stripe Elements and Embedded Checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//!
//! # Run the server
//! elements-gateway
//! ```

use gateway_api::{routes, state::AppState};
use gateway_core::SessionStore;
use std::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (LOG_FORMAT=json for structured output)
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json");
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json()))
        .with((!json_logs).then(|| fmt::layer()))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();
    let settings = state.orchestrator.settings();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.orchestrator.provider_name());
    info!(
        "Defaults: amount={} currency={} line_items={} return_url={:?}",
        settings.default_amount,
        settings.default_currency,
        settings.default_line_items.len(),
        state.orchestrator.return_url()
    );

    spawn_session_sweeper(
        state.orchestrator.sessions().clone(),
        Duration::from_secs(state.config.session_sweep_secs),
        state.config.session_ttl(),
    );

    // Create router
    let app = routes::create_router(state);

    info!("elements-gateway starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("PaymentIntent: POST http://{}/api/stripe/create-payment-intent", addr);
        info!("Checkout Session: POST http://{}/api/stripe/create-checkout-session", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop payment sessions nobody has touched in `ttl`.
fn spawn_session_sweeper(store: SessionStore, every: Duration, ttl: chrono::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
        loop {
            interval.tick().await;
            let removed = store.prune_stale(ttl).await;
            if removed > 0 {
                debug!("Pruned {} stale payment sessions", removed);
            }
        }
    });
}
