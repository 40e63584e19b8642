//! Screening Telemetry
//!
//! Aggregate counters for screenings: verdict histogram, chains without
//! data, latency. No contract or wallet addresses are stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::core::screener::ChainOutcome;
use crate::models::types::Verdict;

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    /// Screen requests handled
    pub total_screenings: u64,
    /// Chains that produced a full report
    pub chains_reported: u64,
    /// Chains with no holder list
    pub chains_no_holders: u64,
    /// Chains with holders but no token metadata
    pub chains_no_token_info: u64,
    /// Chain names not in the table
    pub chains_unsupported: u64,
    /// Reports by verdict key
    pub verdicts: HashMap<String, u64>,
    /// Average screening latency (ms)
    pub avg_latency_ms: f64,
    pub period_start: i64,
    pub period_end: i64,
}

impl TelemetryStats {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Boxed text summary printed on shutdown
    pub fn summary(&self) -> String {
        let count = |v: Verdict| self.verdicts.get(v.key()).copied().unwrap_or(0);
        format!(
            r#"
╔══════════════════════════════════════════════════╗
║          📊 TOKEN SCREENER - SESSION REPORT      ║
╠══════════════════════════════════════════════════╣
║   🔍 Screenings:               {:>10}        ║
║   📈 Chain reports:            {:>10}        ║
║   ⚠️  No holder data:           {:>10}        ║
║   ⚠️  No token info:            {:>10}        ║
║                                                  ║
║   ✅ Likely Safe:              {:>10}        ║
║   🟠 Use Caution:              {:>10}        ║
║   🔴 Very Risky:               {:>10}        ║
║   🔴 No liquidity:             {:>10}        ║
║                                                  ║
║   ⚡ Avg latency:              {:>10.2}ms      ║
╚══════════════════════════════════════════════════╝
"#,
            self.total_screenings,
            self.chains_reported,
            self.chains_no_holders,
            self.chains_no_token_info,
            count(Verdict::LikelySafe),
            count(Verdict::UseCaution),
            count(Verdict::AvoidVeryRisky),
            count(Verdict::AvoidNoLiquidity),
            self.avg_latency_ms,
        )
    }
}

/// Thread-safe collector shared by the API handlers
pub struct TelemetryCollector {
    total_screenings: AtomicU64,
    total_latency_ms: AtomicU64,
    chains_reported: AtomicU64,
    chains_no_holders: AtomicU64,
    chains_no_token_info: AtomicU64,
    chains_unsupported: AtomicU64,
    verdict_counts: RwLock<HashMap<Verdict, u64>>,
    session_start: i64,
    export_dir: PathBuf,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self::with_export_dir(PathBuf::from("./telemetry"))
    }

    pub fn with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            total_screenings: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            chains_reported: AtomicU64::new(0),
            chains_no_holders: AtomicU64::new(0),
            chains_no_token_info: AtomicU64::new(0),
            chains_unsupported: AtomicU64::new(0),
            verdict_counts: RwLock::new(HashMap::new()),
            session_start: chrono::Utc::now().timestamp(),
            export_dir,
        }
    }

    /// Record one screen request and its per-chain outcomes
    pub fn record_screening(&self, outcomes: &[ChainOutcome], latency_ms: u64) {
        self.total_screenings.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);

        for outcome in outcomes {
            match outcome {
                ChainOutcome::Report(report) => {
                    self.chains_reported.fetch_add(1, Ordering::Relaxed);
                    if let Ok(mut counts) = self.verdict_counts.write() {
                        *counts.entry(report.risk.verdict).or_insert(0) += 1;
                    }
                }
                ChainOutcome::NoHolderData { .. } => {
                    self.chains_no_holders.fetch_add(1, Ordering::Relaxed);
                }
                ChainOutcome::NoTokenInfo { .. } => {
                    self.chains_no_token_info.fetch_add(1, Ordering::Relaxed);
                }
                ChainOutcome::UnsupportedChain { .. } => {
                    self.chains_unsupported.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    pub fn get_stats(&self) -> TelemetryStats {
        let total_screenings = self.total_screenings.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency_ms = if total_screenings > 0 {
            total_latency as f64 / total_screenings as f64
        } else {
            0.0
        };

        let verdicts = self
            .verdict_counts
            .read()
            .map(|counts| counts.iter().map(|(k, v)| (k.key().to_string(), *v)).collect())
            .unwrap_or_default();

        TelemetryStats {
            total_screenings,
            chains_reported: self.chains_reported.load(Ordering::Relaxed),
            chains_no_holders: self.chains_no_holders.load(Ordering::Relaxed),
            chains_no_token_info: self.chains_no_token_info.load(Ordering::Relaxed),
            chains_unsupported: self.chains_unsupported.load(Ordering::Relaxed),
            verdicts,
            avg_latency_ms,
            period_start: self.session_start,
            period_end: chrono::Utc::now().timestamp(),
        }
    }

    /// Write current stats to `<export_dir>/stats_<ts>.json`
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;

        let stats = self.get_stats();
        let path = self
            .export_dir
            .join(format!("stats_{}.json", stats.period_end));
        fs::write(&path, stats.to_json())?;

        Ok(path)
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_holders(chain: &str) -> ChainOutcome {
        ChainOutcome::NoHolderData {
            chain: chain.to_string(),
            chain_id: 1,
        }
    }

    #[test]
    fn test_collector_counts_outcomes() {
        let collector = TelemetryCollector::new();
        collector.record_screening(
            &[
                no_holders("ethereum"),
                ChainOutcome::UnsupportedChain {
                    chain: "atlantis".to_string(),
                },
            ],
            40,
        );
        collector.record_screening(&[no_holders("base")], 20);

        let stats = collector.get_stats();
        assert_eq!(stats.total_screenings, 2);
        assert_eq!(stats.chains_no_holders, 2);
        assert_eq!(stats.chains_unsupported, 1);
        assert_eq!(stats.chains_reported, 0);
        assert!((stats.avg_latency_ms - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats() {
        let stats = TelemetryCollector::new().get_stats();
        assert_eq!(stats.avg_latency_ms, 0.0);
        assert!(stats.verdicts.is_empty());
    }

    #[test]
    fn test_summary_and_json() {
        let mut stats = TelemetryStats {
            total_screenings: 12,
            ..Default::default()
        };
        stats.verdicts.insert("use_caution".to_string(), 3);

        assert!(stats.to_json().contains("\"total_screenings\": 12"));
        let summary = stats.summary();
        assert!(summary.contains("12"));
        assert!(summary.contains("3"));
    }

    #[test]
    fn test_export_stats_json_writes_file() {
        let dir = std::env::temp_dir().join(format!("screener_telemetry_{}", uuid::Uuid::new_v4()));
        let collector = TelemetryCollector::with_export_dir(dir.clone());
        collector.record_screening(&[no_holders("ethereum")], 5);

        let path = collector.export_stats_json().unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("chains_no_holders"));
        let _ = fs::remove_dir_all(dir);
    }
}
