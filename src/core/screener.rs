//! Screener Pipeline
//!
//! Per chain: resolve id → fetch holders → fetch token info → normalize →
//! score → market summary + distribution. Chains run concurrently, at most
//! `max_concurrency` at a time, and come back in the order they were requested.

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::distribution::{Distribution, MarketSummary};
use super::normalizer::{attach_human_balances, normalize};
use super::risk_score::{score, Concentration};
use crate::models::config::ScreenerConfig;
use crate::models::types::{RawHolder, ScoreResult, TokenInfo};
use crate::utils::constants::{
    chain_id_for, DEFAULT_HOLDER_LIMIT, DEFAULT_SCREEN_CONCURRENCY, DISPLAY_TOP_N,
};

/// Source of holder lists and token metadata.
///
/// Implementations absorb their own failures: an unreachable upstream or an
/// unknown chain yields an empty list, never an error.
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    async fn token_holders(&self, address: &str, chain_id: u64, limit: u32) -> Vec<RawHolder>;

    async fn token_info(&self, address: &str, chain_id: u64) -> Vec<TokenInfo>;
}

#[async_trait]
impl<T: TokenDataSource + ?Sized> TokenDataSource for Arc<T> {
    async fn token_holders(&self, address: &str, chain_id: u64, limit: u32) -> Vec<RawHolder> {
        (**self).token_holders(address, chain_id, limit).await
    }

    async fn token_info(&self, address: &str, chain_id: u64) -> Vec<TokenInfo> {
        (**self).token_info(address, chain_id).await
    }
}

/// Full result for one chain
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub chain: String,
    pub chain_id: u64,
    pub token: TokenInfo,
    pub risk: ScoreResult,
    pub concentration: Option<Concentration>,
    pub market: MarketSummary,
    pub distribution: Distribution,
    pub holders_fetched: usize,
}

/// What happened on one requested chain
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChainOutcome {
    Report(ChainReport),
    UnsupportedChain { chain: String },
    NoHolderData { chain: String, chain_id: u64 },
    NoTokenInfo { chain: String, chain_id: u64 },
}

impl ChainOutcome {
    pub fn chain(&self) -> &str {
        match self {
            ChainOutcome::Report(report) => &report.chain,
            ChainOutcome::UnsupportedChain { chain }
            | ChainOutcome::NoHolderData { chain, .. }
            | ChainOutcome::NoTokenInfo { chain, .. } => chain,
        }
    }

    pub fn report(&self) -> Option<&ChainReport> {
        match self {
            ChainOutcome::Report(report) => Some(report),
            _ => None,
        }
    }
}

pub struct Screener<S: TokenDataSource> {
    source: S,
    holder_limit: u32,
    top_n: usize,
    max_concurrency: usize,
}

impl<S: TokenDataSource> Screener<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            holder_limit: DEFAULT_HOLDER_LIMIT,
            top_n: DISPLAY_TOP_N,
            max_concurrency: DEFAULT_SCREEN_CONCURRENCY,
        }
    }

    /// Holder limit, table size and concurrency from config
    pub fn with_config(source: S, config: &ScreenerConfig) -> Self {
        Self {
            source,
            holder_limit: config.holder_limit,
            top_n: config.top_n,
            max_concurrency: config.max_concurrency,
        }
    }

    /// Cap on chains in flight at once (0 is treated as 1)
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Screen one contract on every requested chain
    pub async fn screen(&self, contract: &str, chains: &[String]) -> Vec<ChainOutcome> {
        let start = Instant::now();
        info!("🔍 Screening {} on {} chain(s)", contract, chains.len());

        // buffered keeps request order
        let futures: Vec<_> = chains
            .iter()
            .map(|chain| self.screen_chain(contract, chain))
            .collect();
        let outcomes: Vec<ChainOutcome> = stream::iter(futures)
            .buffered(self.max_concurrency.max(1))
            .collect()
            .await;

        info!(
            "✅ Screening done: {} report(s) in {}ms",
            outcomes.iter().filter(|o| o.report().is_some()).count(),
            start.elapsed().as_millis()
        );
        outcomes
    }

    /// Screen one contract on one chain
    pub async fn screen_chain(&self, contract: &str, chain: &str) -> ChainOutcome {
        let chain = chain.trim().to_lowercase();
        let Some(chain_id) = chain_id_for(&chain) else {
            warn!("⚠️ Unsupported chain: {}", chain);
            return ChainOutcome::UnsupportedChain { chain };
        };

        let raw_holders = self
            .source
            .token_holders(contract, chain_id, self.holder_limit)
            .await;
        if raw_holders.is_empty() {
            warn!("⚠️ No holder data on {}", chain);
            return ChainOutcome::NoHolderData { chain, chain_id };
        }

        let token = self
            .source
            .token_info(contract, chain_id)
            .await
            .into_iter()
            .find(|t| t.chain_id == chain_id);
        let Some(token) = token else {
            warn!("⚠️ No token-info on {}", chain);
            return ChainOutcome::NoTokenInfo { chain, chain_id };
        };

        let holders = attach_human_balances(normalize(&raw_holders), token.decimals_or_zero());
        let risk = score(&holders);
        let concentration = Concentration::from_holders(&holders);
        let market = MarketSummary::from_token(&token);
        let distribution = Distribution::build(&holders, &market.human_supply, self.top_n);

        debug!(
            chain = %chain,
            score = risk.score,
            holders = holders.len(),
            "chain scored"
        );

        ChainOutcome::Report(ChainReport {
            chain,
            chain_id,
            token,
            risk,
            concentration,
            market,
            distribution,
            holders_fetched: holders.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Verdict;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source keyed by chain id
    #[derive(Default)]
    struct FakeSource {
        holders: HashMap<u64, Vec<RawHolder>>,
        tokens: HashMap<u64, Vec<TokenInfo>>,
        holder_calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenDataSource for FakeSource {
        async fn token_holders(&self, _address: &str, chain_id: u64, _limit: u32) -> Vec<RawHolder> {
            self.holder_calls.fetch_add(1, Ordering::SeqCst);
            self.holders.get(&chain_id).cloned().unwrap_or_default()
        }

        async fn token_info(&self, _address: &str, chain_id: u64) -> Vec<TokenInfo> {
            self.tokens.get(&chain_id).cloned().unwrap_or_default()
        }
    }

    fn token(chain_id: u64, supply: &str, decimals: u32) -> TokenInfo {
        TokenInfo {
            chain_id,
            symbol: Some("TKN".to_string()),
            name: Some("Token".to_string()),
            decimals: Some(decimals),
            total_supply: Some(supply.into()),
            price_usd: Some(2.0),
            logo: None,
        }
    }

    fn equal_holders(n: usize, balance: &str) -> Vec<RawHolder> {
        (0..n)
            .map(|i| RawHolder::new(format!("0x{:040x}", i), balance))
            .collect()
    }

    fn chains(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_report_for_healthy_chain() {
        let mut source = FakeSource::default();
        source.holders.insert(1, equal_holders(25, "100"));
        source.tokens.insert(1, vec![token(1, "2500", 0)]);

        let screener = Screener::new(source);
        let out = screener.screen("0xabc", &chains(&["ethereum"])).await;

        let report = out[0].report().unwrap();
        assert_eq!(report.chain_id, 1);
        assert_eq!(report.risk.score, 100);
        assert_eq!(report.risk.verdict, Verdict::LikelySafe);
        assert_eq!(report.holders_fetched, 25);
        assert_eq!(report.distribution.rows.len(), 20);
        assert_eq!(report.distribution.others, bigdecimal::BigDecimal::from(500));
    }

    #[tokio::test]
    async fn test_outcomes_keep_request_order() {
        let mut source = FakeSource::default();
        source.holders.insert(56, equal_holders(3, "10"));
        source.tokens.insert(56, vec![token(56, "30", 0)]);
        source.holders.insert(1, equal_holders(3, "10"));

        let screener = Screener::new(source);
        let out = screener
            .screen("0xabc", &chains(&["bsc", "nowhere", "ethereum", "base"]))
            .await;

        assert_eq!(out.len(), 4);
        assert!(out[0].report().is_some());
        assert!(matches!(&out[1], ChainOutcome::UnsupportedChain { chain } if chain == "nowhere"));
        assert!(matches!(out[2], ChainOutcome::NoTokenInfo { chain_id: 1, .. }));
        assert!(matches!(out[3], ChainOutcome::NoHolderData { chain_id: 8453, .. }));
    }

    #[tokio::test]
    async fn test_unsupported_chain_skips_fetch() {
        let screener = Screener::new(FakeSource::default());
        screener.screen("0xabc", &chains(&["atlantis"])).await;
        assert_eq!(screener.source().holder_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_token_info_selected_by_chain_id() {
        let mut source = FakeSource::default();
        source.holders.insert(10, equal_holders(2, "5"));
        // record for another chain only
        source.tokens.insert(10, vec![token(1, "10", 0)]);

        let screener = Screener::new(source);
        let out = screener.screen_chain("0xabc", "Optimism").await;
        assert!(matches!(out, ChainOutcome::NoTokenInfo { chain_id: 10, .. }));
        assert_eq!(out.chain(), "optimism");
    }

    #[tokio::test]
    async fn test_duplicate_chains_screened_each_time() {
        let mut source = FakeSource::default();
        source.holders.insert(1, equal_holders(1, "1"));
        source.tokens.insert(1, vec![token(1, "1", 0)]);

        let screener = Screener::new(source);
        let out = screener.screen("0xabc", &chains(&["ethereum", "ethereum"])).await;
        assert_eq!(out.len(), 2);
        assert_eq!(screener.source().holder_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_zero_balances_report_no_liquidity() {
        let mut source = FakeSource::default();
        source.holders.insert(1, equal_holders(5, "0"));
        source.tokens.insert(1, vec![token(1, "0", 18)]);

        let screener = Screener::new(source);
        let out = screener.screen_chain("0xabc", "ethereum").await;
        let report = out.report().unwrap();
        assert_eq!(report.risk.verdict, Verdict::AvoidNoLiquidity);
        assert!(report.concentration.is_none());
        assert!(report.distribution.others_percent.is_none());
    }

    /// Sleeps on every holder fetch and records the peak number in flight
    #[derive(Default)]
    struct SlowSource {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl TokenDataSource for SlowSource {
        async fn token_holders(&self, _address: &str, _chain_id: u64, _limit: u32) -> Vec<RawHolder> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Vec::new()
        }

        async fn token_info(&self, _address: &str, _chain_id: u64) -> Vec<TokenInfo> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_screen_caps_chains_in_flight() {
        let screener = Screener::new(SlowSource::default()).with_concurrency(2);
        let requested = chains(&["ethereum", "base", "bsc", "arbitrum", "optimism", "polygon"]);
        let out = screener.screen("0xabc", &requested).await;

        assert_eq!(out.len(), 6);
        assert_eq!(screener.source().peak.load(Ordering::SeqCst), 2);
        assert_eq!(out[0].chain(), "ethereum");
        assert_eq!(out[5].chain(), "polygon");
    }

    #[tokio::test]
    async fn test_outcome_serializes_with_status_tag() {
        let screener = Screener::new(FakeSource::default());
        let out = screener.screen_chain("0xabc", "ethereum").await;
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["status"], "no_holder_data");
        assert_eq!(json["chain_id"], 1);
    }
}
