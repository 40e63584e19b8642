//! Constants Module - Single Source of Truth
//!
//! Semua konstanta dan tabel chain yang dipakai di seluruh aplikasi
//! didefinisikan di sini. Tidak ada hardcoded chain id di modul lain.

use std::collections::HashMap;

// ============================================
// APPLICATION CONSTANTS
// ============================================

pub const APP_NAME: &str = "TokenScreener";

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = "TokenScreener/0.1.0";

// ============================================
// INDEXING API CONSTANTS
// ============================================

/// Sim API base URL (EVM namespace)
pub const DEFAULT_SIM_BASE_URL: &str = "https://api.sim.dune.com/v1/evm";

/// Header carrying the Sim API key
pub const SIM_API_KEY_HEADER: &str = "X-Sim-Api-Key";

/// Holders requested per chain
pub const DEFAULT_HOLDER_LIMIT: u32 = 500;

/// Default timeout for indexing API requests (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Retries after the first attempt on 429/5xx/timeouts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Chains screened at once per request
pub const DEFAULT_SCREEN_CONCURRENCY: usize = 8;

pub const BASE_RETRY_MS: u64 = 500;
pub const MAX_RETRY_MS: u64 = 8000;
pub const RETRY_JITTER_PERCENT: u64 = 20;

// ============================================
// SCORING / DISPLAY CONSTANTS
// ============================================

/// Significant digits kept for derived decimal divisions
pub const DECIMAL_PRECISION: u64 = 50;

/// Holders shown in the distribution table (plus "Others")
pub const DISPLAY_TOP_N: usize = 20;

// ============================================
// CHAIN TABLE - Single Source of Truth
// ============================================

/// Supported EVM chains, in display order. The first entry is the default.
pub const SUPPORTED_CHAINS: [(&str, u64); 57] = [
    ("ethereum", 1),
    ("optimism", 10),
    ("cronos", 25),
    ("bsc", 56),
    ("linea", 59144),
    ("polygon", 137),
    ("fantom", 250),
    ("base", 8453),
    ("blast", 81457),
    ("zora", 7777777),
    ("scroll", 534352),
    ("arbitrum", 42161),
    ("avalanche", 43114),
    ("celo", 42220),
    ("mantle", 5000),
    ("metis", 1088),
    ("gnosis", 100),
    ("moonbeam", 1284),
    ("moonriver", 1285),
    ("klaytn", 8217),
    ("evmos", 9001),
    ("harmony", 1666600000),
    ("aurora", 1313161554),
    ("okc", 66),
    ("boba", 288),
    ("core", 1116),
    ("dogechain", 2000),
    ("fuse", 122),
    ("iotex", 4689),
    ("kava", 2222),
    ("meter", 82),
    ("oasis", 42262),
    ("shiden", 336),
    ("sx", 416),
    ("telos", 40),
    ("wanchain", 888),
    ("xdc", 50),
    ("astar", 592),
    ("btt", 199),
    ("bitgert", 32520),
    ("canto", 7700),
    ("clv", 1024),
    ("conflux", 1030),
    ("exosama", 2109),
    ("godwoken", 71402),
    ("hydra", 77612),
    ("kcc", 321),
    ("milkomeda", 2001),
    ("oneledger", 311752642),
    ("palm", 11297108109),
    ("rootstock", 30),
    ("sapphire", 23294),
    ("syscoin", 57),
    ("velas", 106),
    ("zkevm", 1101),
    ("meter_testnet", 83),
    ("sepolia", 11155111),
];

lazy_static::lazy_static! {
    /// name -> chain id
    static ref CHAIN_ID_MAP: HashMap<&'static str, u64> =
        SUPPORTED_CHAINS.iter().copied().collect();
}

/// Default chain name (first entry of the table)
pub fn default_chain() -> &'static str {
    SUPPORTED_CHAINS[0].0
}

/// Resolve a chain name to its numeric id (case-insensitive)
pub fn chain_id_for(name: &str) -> Option<u64> {
    CHAIN_ID_MAP.get(name.trim().to_lowercase().as_str()).copied()
}

/// Reverse lookup, first matching name
pub fn chain_name_for(chain_id: u64) -> Option<&'static str> {
    SUPPORTED_CHAINS
        .iter()
        .find(|(_, id)| *id == chain_id)
        .map(|(name, _)| *name)
}

#[inline]
pub fn is_chain_supported(name: &str) -> bool {
    chain_id_for(name).is_some()
}

/// Check if address looks like an EVM address (0x + 40 hex chars)
pub fn is_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(body) => body.len() == 40 && hex::decode(body).is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_lookup() {
        assert_eq!(chain_id_for("ethereum"), Some(1));
        assert_eq!(chain_id_for("  Base "), Some(8453));
        assert_eq!(chain_id_for("palm"), Some(11297108109));
        assert_eq!(chain_id_for("solana"), None);
        assert!(!is_chain_supported("unknown"));
    }

    #[test]
    fn test_chain_table_is_consistent() {
        assert_eq!(CHAIN_ID_MAP.len(), SUPPORTED_CHAINS.len());
        assert_eq!(default_chain(), "ethereum");
        assert_eq!(chain_name_for(42161), Some("arbitrum"));
        assert_eq!(chain_name_for(999_999), None);
    }

    #[test]
    fn test_evm_address_shape() {
        assert!(is_evm_address("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_evm_address("dAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_evm_address("0x1234"));
        assert!(!is_evm_address("0xZZC17F958D2ee523a2206206994597C13D831ec7"));
    }
}
