// =============================================================================
// MarketLens — Main Entry Point
// =============================================================================
//
// Daily-OHLCV technical-analysis service: fetches price history from the
// market-data provider per request, derives indicator and risk metrics, and
// serves them as JSON for the charting front end.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analytics;
mod api;
mod app_state;
mod market_data;
mod pipeline;
mod runtime_config;
mod types;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::market_data::MarketDataClient;
use crate::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("MarketLens starting up");

    let config_path = std::env::var("MARKETLENS_CONFIG")
        .unwrap_or_else(|_| "marketlens_config.json".to_string());
    let config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    info!(
        default_period = %config.default_period,
        rsi_period = config.indicator_params.rsi_period,
        ma_windows = ?(config.indicator_params.ma_short_window, config.indicator_params.ma_long_window),
        "analysis parameters"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let market = match std::env::var("MARKETLENS_DATA_BASE_URL") {
        Ok(base) => {
            info!(base_url = %base, "using overridden market data base URL");
            MarketDataClient::with_base_url(base)
        }
        Err(_) => MarketDataClient::new(),
    };
    let state = Arc::new(AppState::new(config, market));

    // ── 3. Serve the API ─────────────────────────────────────────────────
    let bind_addr =
        std::env::var("MARKETLENS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    let shutdown_state = state.clone();
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {bind_addr}: {e}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await?;

    if let Err(e) = shutdown_state.config.read().save(&config_path) {
        error!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("MarketLens shut down complete.");
    Ok(())
}
