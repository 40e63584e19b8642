//! Token Screener API Server
//!
//! REST API for multi-chain holder-concentration screening
//!
//! Usage:
//!   cargo run --bin screener_api
//!
//! Environment:
//!   SIM_API_KEY       - Sim API key (required)
//!   PORT / SCREENER_PORT - Server port (default: 8080)
//!   SCREENER_HOST     - Server host (default: 0.0.0.0)
//!   SCREENER_API_KEYS - Accepted client keys, comma separated (optional)
//!   RUST_LOG          - Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use token_screener::api::{create_router, start_cleanup_task, AppState};
use token_screener::core::screener::TokenDataSource;
use token_screener::utils::constants::{APP_NAME, APP_VERSION, SUPPORTED_CHAINS};
use token_screener::{Screener, ScreenerConfig, SimClient, TelemetryCollector};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = ScreenerConfig::from_env()?;
    info!("⚙️ {:?}", config);

    let source: Arc<dyn TokenDataSource> = Arc::new(SimClient::new(&config)?);
    let screener = Screener::with_config(source, &config);

    let telemetry = Arc::new(TelemetryCollector::new());
    let telemetry_for_shutdown = telemetry.clone();

    let state = Arc::new(AppState::new(screener, telemetry));

    start_cleanup_task();
    info!("🧹 Background cleanup task started");

    let app = create_router(state);

    // PORT is set by hosting platforms; SCREENER_PORT for local runs
    let host = std::env::var("SCREENER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("SCREENER_PORT"))
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("🚀 {} API v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /v1/screen   - Screen a token on one or more chains");
    info!("  GET  /v1/chains   - Supported chains ({})", SUPPORTED_CHAINS.len());
    info!("  GET  /v1/stats    - Screening statistics");
    info!("  GET  /v1/health   - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("⚠️ Failed to listen for Ctrl+C: {}", e);
        }
    };

    // peer address feeds the per-IP rate limit for anonymous clients
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    info!("");
    info!("🛑 Shutdown signal received, cleaning up...");

    let stats = telemetry_for_shutdown.get_stats();
    println!("{}", stats.summary());

    match telemetry_for_shutdown.export_stats_json() {
        Ok(path) => info!("   ✅ Stats exported to: {}", path.display()),
        Err(e) => warn!("   ⚠️ Failed to export stats: {}", e),
    }

    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════════════════╗
    ║                                                      ║
    ║        T O K E N   S C R E E N E R   A P I           ║
    ║                                                      ║
    ║      Holder Concentration Risk, 57 EVM chains        ║
    ║                                                      ║
    ╚══════════════════════════════════════════════════════╝
    "#
    );
}
