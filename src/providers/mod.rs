//! Providers Module - External Data Sources
//!
//! Jalur data: Sim API untuk holder list dan token metadata.

pub mod sim;

pub use sim::*;
