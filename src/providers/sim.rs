//! Sim API Client - Multi-Chain Holder & Token Metadata
//!
//! Endpoints:
//! - `GET /token-holders/{chain_id}/{address}?limit={n}` → `{"holders": [...]}`
//! - `GET /token-info/{address}?chain_ids={id}&limit=1` → `{"tokens": [...]}`
//!
//! Retryable failures (429, 5xx, timeouts, connect errors) back off
//! exponentially with ±20% jitter. Everything else fails fast.
//!
//! The `TokenDataSource` impl absorbs every failure into an empty list.

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::screener::TokenDataSource;
use crate::models::config::ScreenerConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{RawHolder, TokenInfo};
use crate::utils::constants::{
    chain_name_for, BASE_RETRY_MS, MAX_RETRY_MS, RETRY_JITTER_PERCENT, SIM_API_KEY_HEADER,
    USER_AGENT as USER_AGENT_CONST,
};

#[derive(Debug, Deserialize)]
struct HoldersResponse {
    #[serde(default)]
    holders: Vec<RawHolder>,
}

#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    #[serde(default)]
    tokens: Vec<TokenInfo>,
}

/// Sim API client with retry and key protection
#[derive(Clone)]
pub struct SimClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl SimClient {
    pub fn new(config: &ScreenerConfig) -> AppResult<Self> {
        let client = Self::build_client(config)?;
        info!("🔑 Sim API client ready for {} (key hidden)", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    fn build_client(config: &ScreenerConfig) -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| AppError::invalid_config("SIM_API_KEY", "<non-ascii>"))?;
        key.set_sensitive(true);
        headers.insert(SIM_API_KEY_HEADER, key);

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Holder list for a token on one chain
    pub async fn try_get_token_holders(
        &self,
        address: &str,
        chain_id: u64,
        limit: u32,
    ) -> AppResult<Vec<RawHolder>> {
        let url = format!(
            "{}/token-holders/{}/{}",
            self.base_url,
            chain_id,
            address.to_lowercase()
        );
        let query = [("limit", limit.to_string())];

        let response: HoldersResponse = self.get_with_retry(&url, &query).await?;
        debug!("📊 Sim: {} holders on chain {}", response.holders.len(), chain_id);
        Ok(response.holders)
    }

    /// Token metadata records; callers select by `chain_id`
    pub async fn try_get_token_info(&self, address: &str, chain_id: u64) -> AppResult<Vec<TokenInfo>> {
        let url = format!("{}/token-info/{}", self.base_url, address);
        let query = [("chain_ids", chain_id.to_string()), ("limit", "1".to_string())];

        let response: TokenInfoResponse = self.get_with_retry(&url, &query).await?;
        Ok(response.tokens)
    }

    /// GET with exponential backoff on retryable failures
    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let mut attempt = 0;
        loop {
            match self.execute_get::<T>(url, query).await {
                Ok(result) => return Ok(result),
                Err(e) if e.code.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(
                        "⏳ {} (retry {}/{} after {}ms)",
                        e, attempt, self.max_retries, delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::invalid_response(format!("Failed to parse Sim response: {}", e)))
    }
}

/// `BASE_RETRY_MS * 2^(attempt-1)`, capped, with ±jitter
fn backoff_delay(attempt: u32) -> u64 {
    let base_delay = BASE_RETRY_MS.saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)));
    let capped_delay = base_delay.min(MAX_RETRY_MS);

    let jitter_range = ((capped_delay * RETRY_JITTER_PERCENT) / 100) as i64;
    let jitter: i64 = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
    (capped_delay as i64 + jitter).max(100) as u64
}

#[async_trait]
impl TokenDataSource for SimClient {
    async fn token_holders(&self, address: &str, chain_id: u64, limit: u32) -> Vec<RawHolder> {
        match self.try_get_token_holders(address, chain_id, limit).await {
            Ok(holders) => holders,
            Err(e) => {
                warn!(
                    "⚠️ Sim holders failed on {}: {}",
                    chain_name_for(chain_id).unwrap_or("unknown"),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn token_info(&self, address: &str, chain_id: u64) -> Vec<TokenInfo> {
        match self.try_get_token_info(address, chain_id).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(
                    "⚠️ Sim token-info failed on {}: {}",
                    chain_name_for(chain_id).unwrap_or("unknown"),
                    e
                );
                Vec::new()
            }
        }
    }
}
