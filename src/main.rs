//! Token Screener CLI
//!
//! Usage:
//!   token_screener <contract> [chain ...]
//!
//! Screens an ERC-20 contract for holder concentration on each chain
//! (default: ethereum) and prints a report per chain.
//!
//! Environment:
//!   SIM_API_KEY - Sim API key (required)
//!   RUST_LOG    - Log level (default: info)

use eyre::{bail, Result};
use tracing_subscriber::EnvFilter;

use token_screener::report::{render_outcome, summary_line};
use token_screener::utils::constants::{default_chain, is_evm_address, SUPPORTED_CHAINS};
use token_screener::{Screener, ScreenerConfig, SimClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let mut args = std::env::args().skip(1);
    let Some(contract) = args.next() else {
        print_usage();
        bail!("missing contract address");
    };
    let contract = contract.trim().to_string();
    if !is_evm_address(&contract) {
        bail!("{}", token_screener::AppError::invalid_address(&contract));
    }

    let mut chains: Vec<String> = args.collect();
    if chains.is_empty() {
        chains.push(default_chain().to_string());
    }

    let config = ScreenerConfig::from_env()?;
    let client = SimClient::new(&config)?;
    let screener = Screener::with_config(client, &config);

    let outcomes = screener.screen(&contract, &chains).await;

    println!();
    for outcome in &outcomes {
        println!("{}", render_outcome(outcome));
    }

    let reports: Vec<_> = outcomes.iter().filter_map(|o| o.report()).collect();
    if reports.is_empty() {
        println!("No chain returned enough data to score {}.", contract);
    } else {
        println!("📋 Summary");
        for report in reports {
            println!("   {}", summary_line(report));
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: token_screener <contract> [chain ...]");
    eprintln!();
    eprintln!("Supported chains:");
    let names: Vec<&str> = SUPPORTED_CHAINS.iter().map(|(name, _)| *name).collect();
    for line in names.chunks(8) {
        eprintln!("   {}", line.join(", "));
    }
}
