// =============================================================================
// Aurora Charts — Main Entry Point
// =============================================================================
//
// Loads the price series once, then serves indicator series and chart specs
// over REST until Ctrl+C.  The last indicator selection is saved on shutdown.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use aurora_charts::api;
use aurora_charts::app_state::AppState;
use aurora_charts::chart::ChartContext;
use aurora_charts::market_data::load_price_csv;
use aurora_charts::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Aurora Charts — starting up");

    let config_path = PathBuf::from(
        std::env::var("AURORA_CONFIG_PATH").unwrap_or_else(|_| "runtime_config.json".into()),
    );

    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();

    // A persisted selection must validate before it is served.
    if let Err(e) = config.indicators.validate() {
        warn!(error = %e, "Persisted indicator selection is invalid, resetting to defaults");
        config.indicators = Default::default();
    }
    config
        .oscillators
        .validate()
        .context("invalid oscillator parameters in runtime config")?;

    // ── 2. Load the price series (fail fast) ─────────────────────────────
    let prices = load_price_csv(&config.data_path)?;

    let context = ChartContext::new(prices, config.instrument_label.clone())
        .with_theme(config.theme.clone())
        .with_layout(config.layout.clone());

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(context, config, Some(config_path.clone())));

    // ── 3. Start the API server ──────────────────────────────────────────
    let app = api::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await
        .context("API server failed")?;

    // ── 4. Persist the selection ─────────────────────────────────────────
    if let Err(e) = state.runtime_config.read().save(&config_path) {
        error!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("Aurora Charts shut down complete.");
    Ok(())
}
