//! Utils Module - Helper Functions & Shared Utilities
//!
//! Berisi fungsi-fungsi pembantu yang digunakan di seluruh aplikasi.

pub mod constants;
pub mod format;
pub mod telemetry;

pub use constants::*;
pub use format::*;
pub use telemetry::*;
