//! Integration tests for the screening core (public API only)

use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use token_screener::{
    attach_human_balances, normalize, score, Distribution, MarketSummary, RawHolder, RiskFlag,
    TokenInfo, Verdict,
};

fn raw_holders(balances: &[&str]) -> Vec<RawHolder> {
    balances
        .iter()
        .enumerate()
        .map(|(i, b)| RawHolder::new(format!("0x{:040x}", i + 1), *b))
        .collect()
}

#[test]
fn test_normalized_list_is_sorted_descending() {
    let holders = normalize(&raw_holders(&["5", "900", "12", "0", "300"]));
    assert!(holders.windows(2).all(|w| w[0].raw_balance >= w[1].raw_balance));
    assert_eq!(holders[0].raw_balance, BigUint::from(900u32));
}

#[test]
fn test_missing_balance_sinks_to_bottom() {
    let mut input = raw_holders(&["10", "20"]);
    input.insert(
        0,
        RawHolder {
            wallet_address: "0xmissing".to_string(),
            balance: None,
        },
    );
    let holders = normalize(&input);
    assert_eq!(holders.last().unwrap().wallet, "0xmissing");
    assert_eq!(holders.last().unwrap().raw_balance, BigUint::default());
}

#[test]
fn test_empty_list_scores_zero_supply() {
    assert!(normalize(&[]).is_empty());

    let result = score(&[]);
    assert_eq!(result.score, 0);
    assert_eq!(result.flag_strings(), vec!["Zero supply"]);
    assert_eq!(result.verdict.as_str(), "AVOID – No liquidity");
}

#[test]
fn test_twenty_five_equal_holders_are_safe() {
    let holders = normalize(&raw_holders(&["100"; 25]));
    let result = score(&holders);
    assert_eq!(result.score, 100);
    assert!(result.flags.is_empty());
    assert_eq!(result.verdict.as_str(), "Likely Safe");
}

#[test]
fn test_ten_holders_with_dominant_whale() {
    // top 80%, top 20 = 100%
    let holders = normalize(&raw_holders(&[
        "800", "50", "50", "20", "20", "20", "10", "10", "10", "10",
    ]));
    let result = score(&holders);
    assert_eq!(result.score, 30);
    assert_eq!(
        result.flag_strings(),
        vec!["<20 holders", "Top holder >70%", "Top20 >90%"]
    );
    assert_eq!(result.verdict.as_str(), "AVOID – Very Risky");
}

#[test]
fn test_use_caution_band() {
    // 30 holders: whale 72%, top 20 ~98% → 100 - 30 - 20
    let mut balances = vec!["7200"];
    balances.extend(std::iter::repeat("100").take(28));
    balances.push("0");
    let result = score(&normalize(&raw_holders(&balances)));
    assert_eq!(result.score, 50);
    assert_eq!(
        result.flags,
        vec![RiskFlag::TopHolderDominant, RiskFlag::Top20Concentrated]
    );
    assert_eq!(result.verdict, Verdict::UseCaution);
}

#[test]
fn test_score_is_idempotent() {
    let holders = normalize(&raw_holders(&["3", "1", "4", "1", "5", "9", "2", "6"]));
    let first = score(&holders);
    let second = score(&holders);
    assert_eq!(first, second);
}

#[test]
fn test_others_is_zero_when_supply_matches_holders() {
    let holders = attach_human_balances(normalize(&raw_holders(&["1500", "1000", "500"])), 2);
    let token = TokenInfo {
        chain_id: 1,
        decimals: Some(2),
        total_supply: Some("3000".into()),
        ..Default::default()
    };
    let market = MarketSummary::from_token(&token);
    let dist = Distribution::build(&holders, &market.human_supply, holders.len());

    assert_eq!(market.human_supply, BigDecimal::from(30));
    assert_eq!(dist.others, BigDecimal::from(0));
    assert_eq!(dist.rows[0].percent_of_supply, Some(BigDecimal::from(50)));
}

#[test]
fn test_large_supply_with_eighteen_decimals() {
    let holders = attach_human_balances(
        normalize(&raw_holders(&["600000000000000000000000000", "400000000000000000000000000"])),
        18,
    );
    let token = TokenInfo {
        chain_id: 8453,
        decimals: Some(18),
        total_supply: Some("1000000000000000000000000000".into()),
        price_usd: Some(0.25),
        ..Default::default()
    };
    let market = MarketSummary::from_token(&token);
    assert_eq!(market.human_supply, BigDecimal::from(1_000_000_000));
    assert_eq!(market.market_cap_usd, BigDecimal::from(250_000_000));

    let dist = Distribution::build(&holders, &market.human_supply, 20);
    assert_eq!(dist.rows[0].balance, BigDecimal::from(600_000_000));
    assert!(!dist.others_negative());
}
