//! Type definitions for the screener
//! Holder records, token metadata and scoring output

use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================
// Upstream records
// ============================================

/// Holder entry as returned by the indexing API, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHolder {
    #[serde(default)]
    pub wallet_address: String,
    /// Base-unit balance; a digit string or a JSON number, possibly absent
    #[serde(default)]
    pub balance: Option<serde_json::Value>,
}

impl RawHolder {
    pub fn new(wallet: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet.into(),
            balance: Some(serde_json::Value::String(balance.into())),
        }
    }
}

/// Token metadata for one chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    pub chain_id: u64,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
    /// Raw supply in base units; a digit string or a JSON number
    #[serde(default)]
    pub total_supply: Option<serde_json::Value>,
    #[serde(default)]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl TokenInfo {
    pub fn decimals_or_zero(&self) -> u32 {
        self.decimals.unwrap_or(0)
    }

    pub fn price_or_zero(&self) -> f64 {
        self.price_usd.unwrap_or(0.0)
    }

    pub fn symbol_or_default(&self) -> &str {
        self.symbol.as_deref().unwrap_or("?")
    }

    /// Raw supply; absent or malformed supply counts as zero
    pub fn total_supply_raw(&self) -> BigUint {
        crate::core::normalizer::parse_balance(self.total_supply.as_ref())
    }
}

// ============================================
// Normalized holders
// ============================================

/// One wallet's position in a token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolderRecord {
    pub wallet: String,
    #[serde(serialize_with = "serialize_biguint")]
    pub raw_balance: BigUint,
    /// raw_balance / 10^decimals, set once decimals is known
    pub human_balance: Option<BigDecimal>,
}

impl HolderRecord {
    pub fn new(wallet: impl Into<String>, raw_balance: BigUint) -> Self {
        Self {
            wallet: wallet.into(),
            raw_balance,
            human_balance: None,
        }
    }
}

fn serialize_biguint<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

// ============================================
// Scoring output
// ============================================

/// Triggered risk rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskFlag {
    /// Total supply across fetched holders is zero
    ZeroSupply,
    /// Fewer than 20 holders listed
    FewHolders,
    /// Largest holder owns more than 70%
    TopHolderDominant,
    /// Top 20 holders own more than 90%
    Top20Concentrated,
}

impl RiskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::ZeroSupply => "Zero supply",
            RiskFlag::FewHolders => "<20 holders",
            RiskFlag::TopHolderDominant => "Top holder >70%",
            RiskFlag::Top20Concentrated => "Top20 >90%",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RiskFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Risk classification derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    LikelySafe,
    UseCaution,
    AvoidVeryRisky,
    /// Terminal zero-supply case
    AvoidNoLiquidity,
}

impl Verdict {
    /// Map a final score to one of the three graded verdicts
    pub fn from_score(score: i32) -> Self {
        if score >= 75 {
            Verdict::LikelySafe
        } else if score >= 50 {
            Verdict::UseCaution
        } else {
            Verdict::AvoidVeryRisky
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelySafe => "Likely Safe",
            Verdict::UseCaution => "Use Caution",
            Verdict::AvoidVeryRisky => "AVOID – Very Risky",
            Verdict::AvoidNoLiquidity => "AVOID – No liquidity",
        }
    }

    /// Short machine label for stats keys
    pub fn key(&self) -> &'static str {
        match self {
            Verdict::LikelySafe => "likely_safe",
            Verdict::UseCaution => "use_caution",
            Verdict::AvoidVeryRisky => "avoid_very_risky",
            Verdict::AvoidNoLiquidity => "avoid_no_liquidity",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::LikelySafe => "✅",
            Verdict::UseCaution => "🟠",
            Verdict::AvoidVeryRisky | Verdict::AvoidNoLiquidity => "🔴",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Output of the concentration scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: i32,
    pub flags: Vec<RiskFlag>,
    pub verdict: Verdict,
}

impl ScoreResult {
    pub fn flag_strings(&self) -> Vec<&'static str> {
        self.flags.iter().map(RiskFlag::as_str).collect()
    }
}
