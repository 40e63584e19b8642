//! Core Module - Screening Logic
//!
//! Otak aplikasi: normalisasi holder, risk scoring, distribusi supply.

pub mod distribution;
pub mod normalizer;
pub mod risk_score;
pub mod screener;

pub use distribution::*;
pub use normalizer::*;
pub use risk_score::*;
pub use screener::*;
