//! Risk Scoring Module
//! Holder-concentration score (0-100) with the rules that produced it
//!
//! Rules, evaluated in order against the ranked holder list:
//! - fewer than 20 holders: -20
//! - top holder above 70% of listed supply: -30
//! - top 20 holders above 90% of listed supply: -20
//!
//! Verdict: >= 75 Likely Safe, >= 50 Use Caution, else AVOID.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::Serialize;

use crate::models::types::{HolderRecord, RiskFlag, ScoreResult, Verdict};
use crate::utils::constants::DECIMAL_PRECISION;

pub const BASE_SCORE: i32 = 100;

pub const MIN_HOLDERS: usize = 20;
pub const FEW_HOLDERS_PENALTY: i32 = 20;

pub const TOP_HOLDER_THRESHOLD_PCT: u32 = 70;
pub const TOP_HOLDER_PENALTY: i32 = 30;

pub const TOP_N_WINDOW: usize = 20;
pub const TOP_N_THRESHOLD_PCT: u32 = 90;
pub const TOP_N_PENALTY: i32 = 20;

/// Score a holder list sorted by raw balance, largest first.
///
/// Pure: the same list always yields the same result. The score is not
/// clamped; the current weights bottom out at 30.
pub fn score(holders: &[HolderRecord]) -> ScoreResult {
    let total_raw: BigUint = holders.iter().map(|h| &h.raw_balance).sum();
    if total_raw.is_zero() {
        return ScoreResult {
            score: 0,
            flags: vec![RiskFlag::ZeroSupply],
            verdict: Verdict::AvoidNoLiquidity,
        };
    }

    let mut score = BASE_SCORE;
    let mut flags = Vec::new();

    if holders.len() < MIN_HOLDERS {
        score -= FEW_HOLDERS_PENALTY;
        flags.push(RiskFlag::FewHolders);
    }

    // non-zero total implies at least one holder
    if exceeds_pct(&holders[0].raw_balance, &total_raw, TOP_HOLDER_THRESHOLD_PCT) {
        score -= TOP_HOLDER_PENALTY;
        flags.push(RiskFlag::TopHolderDominant);
    }

    if exceeds_pct(&top_n_sum(holders, TOP_N_WINDOW), &total_raw, TOP_N_THRESHOLD_PCT) {
        score -= TOP_N_PENALTY;
        flags.push(RiskFlag::Top20Concentrated);
    }

    ScoreResult {
        score,
        flags,
        verdict: Verdict::from_score(score),
    }
}

/// `part / total * 100 > threshold`, evaluated exactly on integers
fn exceeds_pct(part: &BigUint, total: &BigUint, threshold_pct: u32) -> bool {
    part * 100u32 > total * threshold_pct
}

fn top_n_sum(holders: &[HolderRecord], n: usize) -> BigUint {
    holders.iter().take(n).map(|h| &h.raw_balance).sum()
}

/// Concentration percentages of the listed holders, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concentration {
    pub holder_count: usize,
    pub top_holder_pct: BigDecimal,
    pub top20_pct: BigDecimal,
}

impl Concentration {
    /// None when the listed supply is zero
    pub fn from_holders(holders: &[HolderRecord]) -> Option<Self> {
        let total_raw: BigUint = holders.iter().map(|h| &h.raw_balance).sum();
        if total_raw.is_zero() {
            return None;
        }

        Some(Self {
            holder_count: holders.len(),
            top_holder_pct: pct_of(&holders[0].raw_balance, &total_raw),
            top20_pct: pct_of(&top_n_sum(holders, TOP_N_WINDOW), &total_raw),
        })
    }
}

fn pct_of(part: &BigUint, total: &BigUint) -> BigDecimal {
    let part = BigDecimal::from(BigInt::from(part.clone()) * 100);
    let total = BigDecimal::from(BigInt::from(total.clone()));
    (part / total).with_prec(DECIMAL_PRECISION)
}
