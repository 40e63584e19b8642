//! Distribution & Market Values
//!
//! Display-side numbers for one token on one chain: percent of supply per
//! holder, the "Others" remainder, and price/supply/market-cap figures.
//! Supply comes from token metadata, not from the (possibly partial) holder
//! list, so the remainder can go negative. That is reported, never clamped.

use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use serde::Serialize;
use tracing::warn;

use super::normalizer::to_human;
use crate::models::types::{HolderRecord, TokenInfo};
use crate::utils::constants::DECIMAL_PRECISION;
use crate::utils::format::{bar_color, short_address};

/// `human_balance / total_human_supply * 100`; None for a zero supply
pub fn percent_of_supply(
    human_balance: &BigDecimal,
    total_human_supply: &BigDecimal,
) -> Option<BigDecimal> {
    if total_human_supply.is_zero() {
        return None;
    }
    Some(((human_balance * BigDecimal::from(100)) / total_human_supply).with_prec(DECIMAL_PRECISION))
}

/// Supply not covered by the displayed holders (may be negative)
pub fn others_bucket(total_human_supply: &BigDecimal, displayed: &[HolderRecord]) -> BigDecimal {
    let shown: BigDecimal = displayed
        .iter()
        .filter_map(|h| h.human_balance.as_ref())
        .sum();
    total_human_supply - shown
}

/// One row of the top-N table
#[derive(Debug, Clone, Serialize)]
pub struct DistributionRow {
    pub rank: usize,
    pub wallet: String,
    pub label: String,
    pub balance: BigDecimal,
    pub percent_of_supply: Option<BigDecimal>,
    pub bar_color: &'static str,
}

impl DistributionRow {
    pub fn percent_f64(&self) -> f64 {
        self.percent_of_supply
            .as_ref()
            .and_then(|p| p.to_f64())
            .unwrap_or(0.0)
    }
}

/// Top-N holders plus the "Others" remainder
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub top_n: usize,
    pub rows: Vec<DistributionRow>,
    pub others: BigDecimal,
    pub others_percent: Option<BigDecimal>,
}

impl Distribution {
    /// Build from holders that already carry human balances
    pub fn build(holders: &[HolderRecord], total_human_supply: &BigDecimal, top_n: usize) -> Self {
        let displayed = &holders[..holders.len().min(top_n)];

        let rows = displayed
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let balance = h.human_balance.clone().unwrap_or_default();
                let percent = percent_of_supply(&balance, total_human_supply);
                let pct_f64 = percent.as_ref().and_then(|p| p.to_f64()).unwrap_or(0.0);
                DistributionRow {
                    rank: i + 1,
                    wallet: h.wallet.clone(),
                    label: short_address(&h.wallet),
                    balance,
                    percent_of_supply: percent,
                    bar_color: bar_color(pct_f64),
                }
            })
            .collect();

        let others = others_bucket(total_human_supply, displayed);
        if others < BigDecimal::zero() {
            warn!(
                "⚠️ Listed holders exceed reported supply by {} tokens",
                (-others.clone()).with_prec(12)
            );
        }
        let others_percent = percent_of_supply(&others, total_human_supply);

        Self {
            top_n,
            rows,
            others,
            others_percent,
        }
    }

    /// Holder list overstates supply (data-quality condition)
    pub fn others_negative(&self) -> bool {
        self.others < BigDecimal::zero()
    }
}

/// Price, supply and market cap for one token on one chain
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub price_usd: f64,
    pub human_supply: BigDecimal,
    pub market_cap_usd: BigDecimal,
    pub logo: Option<String>,
}

impl MarketSummary {
    pub fn from_token(token: &TokenInfo) -> Self {
        let decimals = token.decimals_or_zero();
        let human_supply = to_human(&token.total_supply_raw(), decimals);
        let price_usd = token.price_or_zero();
        let price = BigDecimal::from_f64(price_usd).unwrap_or_default();

        Self {
            symbol: token.symbol_or_default().to_string(),
            name: token.name.clone().unwrap_or_default(),
            decimals,
            price_usd,
            market_cap_usd: &human_supply * price,
            human_supply,
            logo: token.logo.clone(),
        }
    }
}
