//! Configuration module for the screener
//!
//! Semua nilai default diambil dari utils/constants.rs;
//! environment variables hanya meng-override.

use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOLDER_LIMIT, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_RETRIES,
    DEFAULT_SCREEN_CONCURRENCY, DEFAULT_SIM_BASE_URL, DISPLAY_TOP_N,
};

/// Runtime configuration for the indexing client and reports
#[derive(Clone)]
pub struct ScreenerConfig {
    /// Sim API key (never logged)
    pub api_key: String,
    /// Base URL of the Sim EVM API
    pub base_url: String,
    /// Holders requested per chain
    pub holder_limit: u32,
    /// Timeout for each HTTP request
    pub http_timeout: Duration,
    /// Retries after the first attempt on retryable failures
    pub max_retries: u32,
    /// Rows shown in the distribution table
    pub top_n: usize,
    /// Chains in flight at once during a screen
    pub max_concurrency: usize,
}

impl std::fmt::Debug for ScreenerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenerConfig")
            .field("api_key", &"***HIDDEN***")
            .field("base_url", &self.base_url)
            .field("holder_limit", &self.holder_limit)
            .field("http_timeout", &self.http_timeout)
            .field("max_retries", &self.max_retries)
            .field("top_n", &self.top_n)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}

impl ScreenerConfig {
    /// Config with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_SIM_BASE_URL.to_string(),
            holder_limit: DEFAULT_HOLDER_LIMIT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            top_n: DISPLAY_TOP_N,
            max_concurrency: DEFAULT_SCREEN_CONCURRENCY,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Load from environment (call `dotenvy::dotenv()` first to pick up `.env`)
    pub fn from_env() -> AppResult<Self> {
        let api_key = Self::get_api_key()?;
        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var("SIM_API_BASE_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        config.holder_limit = env_or("SCREENER_HOLDER_LIMIT", config.holder_limit)?;
        config.http_timeout =
            Duration::from_secs(env_or("SCREENER_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?);
        config.max_retries = env_or("SCREENER_MAX_RETRIES", config.max_retries)?;
        config.top_n = env_or("SCREENER_TOP_N", config.top_n)?;
        config.max_concurrency = env_or("SCREENER_CONCURRENCY", config.max_concurrency)?;

        if config.holder_limit == 0 {
            return Err(AppError::invalid_config("SCREENER_HOLDER_LIMIT", "0"));
        }
        if config.max_concurrency == 0 {
            return Err(AppError::invalid_config("SCREENER_CONCURRENCY", "0"));
        }

        info!(
            "⚙️ Config loaded: base_url={}, holder_limit={}, timeout={}s, retries={}, concurrency={}",
            config.base_url,
            config.holder_limit,
            config.http_timeout.as_secs(),
            config.max_retries,
            config.max_concurrency
        );

        Ok(config)
    }

    fn get_api_key() -> AppResult<String> {
        match std::env::var("SIM_API_KEY") {
            Ok(key) if !key.trim().is_empty() && key != "YOUR_API_KEY" => {
                info!("🔑 SIM_API_KEY configured (key hidden)");
                Ok(key.trim().to_string())
            }
            _ => Err(AppError::missing_api_key("SIM_API_KEY")),
        }
    }
}

/// Parse an env var, falling back to `default` when unset
fn env_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::invalid_config(key, &raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_defaults() {
        let config = ScreenerConfig::new("key");
        assert_eq!(config.holder_limit, 500);
        assert_eq!(config.top_n, 20);
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.base_url, "https://api.sim.dune.com/v1/evm");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ScreenerConfig::new("key").with_base_url("http://localhost:9999/");
        assert_eq!(config.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_debug_hides_key() {
        let config = ScreenerConfig::new("super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("SCREENER_TEST_ENV_OR", "abc");
        let err = env_or::<u32>("SCREENER_TEST_ENV_OR", 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        std::env::remove_var("SCREENER_TEST_ENV_OR");
        assert_eq!(env_or::<u32>("SCREENER_TEST_ENV_OR", 5).unwrap(), 5);
    }
}
