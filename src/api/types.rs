//! API Request/Response Types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::screener::ChainOutcome;
use crate::models::errors::AppError;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: None,
        }
    }
}

// ============================================
// Screening
// ============================================

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub token_address: String,
    /// Chain names; empty means the default chain
    #[serde(default)]
    pub chains: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScreenData {
    pub token_address: String,
    pub chains_requested: usize,
    pub chains_reported: usize,
    pub results: Vec<ChainOutcome>,
}

// ============================================
// Chains
// ============================================

#[derive(Debug, Serialize)]
pub struct ChainEntry {
    pub name: String,
    pub chain_id: u64,
}

#[derive(Debug, Serialize)]
pub struct ChainsData {
    pub default_chain: String,
    pub total: usize,
    pub chains: Vec<ChainEntry>,
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub total_screenings: u64,
    pub chains_reported: u64,
    pub chains_no_holders: u64,
    pub chains_no_token_info: u64,
    pub chains_unsupported: u64,
    pub verdicts: HashMap<String, u64>,
    pub avg_latency_ms: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
