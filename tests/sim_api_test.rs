//! Sim API client tests against a local mock server
//!
//! Run with: cargo test --test sim_api_test -- --nocapture

use serde_json::json;
use token_screener::{ChainOutcome, ErrorCode, Screener, ScreenerConfig, SimClient, TokenDataSource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
const TOKEN_LOWER: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

fn client_for(server: &MockServer, max_retries: u32) -> SimClient {
    let config = ScreenerConfig::new("test-key")
        .with_base_url(server.uri())
        .with_max_retries(max_retries);
    SimClient::new(&config).unwrap()
}

fn holders_body(n: usize) -> serde_json::Value {
    let holders: Vec<_> = (0..n)
        .map(|i| json!({ "wallet_address": format!("0x{:040x}", i), "balance": "1000" }))
        .collect();
    json!({ "holders": holders })
}

#[tokio::test]
async fn test_holders_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/token-holders/1/{}", TOKEN_LOWER)))
        .and(query_param("limit", "500"))
        .and(header("X-Sim-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(holders_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let holders = client.try_get_token_holders(TOKEN, 1, 500).await.unwrap();
    assert_eq!(holders.len(), 3);
    assert_eq!(holders[0].balance, Some(json!("1000")));
}

#[tokio::test]
async fn test_token_info_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/token-info/{}", TOKEN)))
        .and(query_param("chain_ids", "8453"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": [{
                "chain_id": 8453,
                "symbol": "USDT",
                "name": "Tether USD",
                "decimals": 6,
                "total_supply": "1000000000",
                "price_usd": 1.0,
                "logo": "https://example.org/usdt.png"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let tokens = client.try_get_token_info(TOKEN, 8453).await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].symbol.as_deref(), Some("USDT"));
    assert_eq!(tokens[0].decimals, Some(6));
}

#[tokio::test]
async fn test_bad_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let err = client.try_get_token_holders(TOKEN, 1, 10).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UpstreamBadStatus);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(holders_body(2)))
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let holders = client.try_get_token_holders(TOKEN, 1, 10).await.unwrap();
    assert_eq!(holders.len(), 2);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let err = client.try_get_token_info(TOKEN, 1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UpstreamInvalidResponse);
}

#[tokio::test]
async fn test_data_source_absorbs_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    assert!(client.token_holders(TOKEN, 1, 10).await.is_empty());
    assert!(client.token_info(TOKEN, 1).await.is_empty());
}

#[tokio::test]
async fn test_screen_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/token-holders/1/{}", TOKEN_LOWER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(holders_body(25)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/token-info/{}", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": [{ "chain_id": 1, "symbol": "TKN", "decimals": 0, "total_supply": "25000" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/token-holders/56/{}", TOKEN_LOWER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "holders": [] })))
        .mount(&server)
        .await;

    let screener = Screener::new(client_for(&server, 0));
    let chains = vec!["ethereum".to_string(), "bsc".to_string()];
    let outcomes = screener.screen(TOKEN, &chains).await;

    let report = outcomes[0].report().unwrap();
    assert_eq!(report.risk.score, 100);
    assert_eq!(report.risk.verdict.as_str(), "Likely Safe");
    assert!(matches!(outcomes[1], ChainOutcome::NoHolderData { chain_id: 56, .. }));
}
