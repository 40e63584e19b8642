//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::screener::{Screener, TokenDataSource};
use crate::models::errors::AppError;
use crate::utils::constants::{default_chain, is_evm_address, APP_VERSION, SUPPORTED_CHAINS};
use crate::utils::telemetry::TelemetryCollector;

/// Upper bound on chains per screen request (duplicates included)
pub const MAX_CHAINS_PER_REQUEST: usize = SUPPORTED_CHAINS.len();

/// Shared application state
pub struct AppState {
    pub screener: Screener<Arc<dyn TokenDataSource>>,
    pub telemetry: Arc<TelemetryCollector>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        screener: Screener<Arc<dyn TokenDataSource>>,
        telemetry: Arc<TelemetryCollector>,
    ) -> Self {
        Self {
            screener,
            telemetry,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(err: AppError, start: Instant) -> ApiFailure {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(&err), elapsed_ms(start))),
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Chains
// ============================================

pub async fn list_chains() -> Json<ApiResponse<ChainsData>> {
    let start = Instant::now();

    let chains: Vec<ChainEntry> = SUPPORTED_CHAINS
        .iter()
        .map(|(name, chain_id)| ChainEntry {
            name: name.to_string(),
            chain_id: *chain_id,
        })
        .collect();

    let data = ChainsData {
        default_chain: default_chain().to_string(),
        total: chains.len(),
        chains,
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Screening
// ============================================

pub async fn screen_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScreenRequest>,
) -> Result<Json<ApiResponse<ScreenData>>, ApiFailure> {
    let start = Instant::now();

    let token_address = req.token_address.trim().to_string();
    if !is_evm_address(&token_address) {
        warn!("⚠️ Rejected screen request: invalid address {}", token_address);
        return Err(failure(AppError::invalid_address(&token_address), start));
    }

    let mut chains = req.chains;
    if chains.is_empty() {
        chains.push(default_chain().to_string());
    }
    if chains.len() > MAX_CHAINS_PER_REQUEST {
        return Err(failure(
            AppError::bad_request(format!(
                "Too many chains: {} (max {})",
                chains.len(),
                MAX_CHAINS_PER_REQUEST
            )),
            start,
        ));
    }

    let results = state.screener.screen(&token_address, &chains).await;
    let chains_reported = results.iter().filter(|o| o.report().is_some()).count();

    let latency = start.elapsed().as_millis() as u64;
    state.telemetry.record_screening(&results, latency);

    info!(
        "📊 Screened {} on {} chain(s), {} report(s) in {}ms",
        token_address,
        chains.len(),
        chains_reported,
        latency
    );

    let data = ScreenData {
        token_address,
        chains_requested: chains.len(),
        chains_reported,
        results,
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let stats = state.telemetry.get_stats();

    let data = StatsData {
        total_screenings: stats.total_screenings,
        chains_reported: stats.chains_reported,
        chains_no_holders: stats.chains_no_holders,
        chains_no_token_info: stats.chains_no_token_info,
        chains_unsupported: stats.chains_unsupported,
        verdicts: stats.verdicts,
        avg_latency_ms: stats.avg_latency_ms,
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
