//! Text rendering of per-chain screening results for the terminal

use std::fmt::Write;

use crate::core::screener::{ChainOutcome, ChainReport};
use crate::utils::format::{format_decimal, format_price, short_address, supply_words, text_bar};

const BAR_WIDTH: usize = 20;

/// Render one outcome; chains without data become a single warning line
pub fn render_outcome(outcome: &ChainOutcome) -> String {
    match outcome {
        ChainOutcome::Report(report) => render_report(report),
        ChainOutcome::UnsupportedChain { chain } => format!("⚠️  Unsupported chain: {}.\n", chain),
        ChainOutcome::NoHolderData { chain, .. } => format!("⚠️  No holder data on {}.\n", chain),
        ChainOutcome::NoTokenInfo { chain, .. } => format!("❌ No token-info on {}.\n", chain),
    }
}

pub fn render_report(report: &ChainReport) -> String {
    let mut out = String::new();
    let market = &report.market;

    // writing into a String cannot fail
    let _ = writeln!(out, "══════════════════════════════════════════════════════════");
    let _ = writeln!(
        out,
        "🔗 {} (chain {}) - {} ({})",
        report.chain, report.chain_id, market.name, market.symbol
    );
    let _ = writeln!(out, "══════════════════════════════════════════════════════════");

    let _ = writeln!(out, "Price:      {}", format_price(market.price_usd));
    let _ = writeln!(
        out,
        "Supply:     {} {} {}",
        format_decimal(&market.human_supply, 0),
        market.symbol,
        supply_words(&market.human_supply, &market.symbol)
    );
    let _ = writeln!(out, "Market Cap: ${}", format_decimal(&market.market_cap_usd, 2));
    if let Some(logo) = &market.logo {
        let _ = writeln!(out, "Logo:       {}", logo);
    }
    let _ = writeln!(out);

    let risk = &report.risk;
    let _ = writeln!(
        out,
        "{} Risk Score: {}/100 - {}",
        risk.verdict.emoji(),
        risk.score,
        risk.verdict
    );
    for flag in &risk.flags {
        let _ = writeln!(out, "   ⚠️  {}", flag);
    }
    if let Some(c) = &report.concentration {
        let _ = writeln!(
            out,
            "   Holders: {} | Top holder: {}% | Top 20: {}%",
            c.holder_count,
            format_decimal(&c.top_holder_pct, 2),
            format_decimal(&c.top20_pct, 2)
        );
    }
    let _ = writeln!(out);

    let dist = &report.distribution;
    let _ = writeln!(out, "Top {} holders:", dist.top_n);
    let _ = writeln!(out, "  #  {:<13} {:>28} {:>9}", "Wallet", "Balance", "% Supply");
    for row in &dist.rows {
        let pct = row
            .percent_of_supply
            .as_ref()
            .map(|p| format!("{}%", format_decimal(p, 2)))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            " {:>2}  {:<13} {:>28} {:>9}  {} {}",
            row.rank,
            row.label,
            format_decimal(&row.balance, 4),
            pct,
            text_bar(row.percent_f64(), BAR_WIDTH),
            row.bar_color
        );
    }
    let others_pct = dist
        .others_percent
        .as_ref()
        .map(|p| format!("{}%", format_decimal(p, 2)))
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(
        out,
        "     {:<13} {:>28} {:>9}",
        "Others",
        format_decimal(&dist.others, 4),
        others_pct
    );
    if dist.others_negative() {
        let _ = writeln!(out, "   ⚠️  Listed balances exceed reported supply");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Full addresses:");
    for row in &dist.rows {
        let _ = writeln!(out, " {:>2}  {}", row.rank, row.wallet);
    }

    out
}

/// One-line summary, e.g. for logs
pub fn summary_line(report: &ChainReport) -> String {
    let top = report
        .distribution
        .rows
        .first()
        .map(|r| short_address(&r.wallet))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {}: {} ({}/100), top holder {}",
        report.risk.verdict.emoji(),
        report.chain,
        report.risk.verdict,
        report.risk.score,
        top
    )
}
