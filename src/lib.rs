//! Token Screener Library
//!
//! Multi-chain ERC-20 holder-concentration screener:
//! - Fetches holder lists and token metadata from the Sim indexing API
//! - Ranks holders and scales balances exactly (arbitrary precision)
//! - Scores concentration risk (0-100) with the rules that fired
//! - Shapes market and distribution figures for display

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod report;
pub mod utils;

pub use crate::core::distribution::{Distribution, DistributionRow, MarketSummary};
pub use crate::core::normalizer::{attach_human_balances, normalize};
pub use crate::core::risk_score::{score, Concentration};
pub use crate::core::screener::{ChainOutcome, ChainReport, Screener, TokenDataSource};
pub use crate::models::config::ScreenerConfig;
pub use crate::models::errors::{AppError, AppResult, ErrorCode};
pub use crate::models::types::{HolderRecord, RawHolder, RiskFlag, ScoreResult, TokenInfo, Verdict};
pub use crate::providers::sim::SimClient;
pub use crate::utils::telemetry::{TelemetryCollector, TelemetryStats};
