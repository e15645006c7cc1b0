//! Core error handling and configuration for tidemark.
//!
//! This crate provides the shared foundation used by the analysis crates:
//! - [`TidemarkError`] — unified error type using `thiserror`
//! - [`ForecastConfig`] — forecast tuning knobs loaded from `tidemark.json`

mod config;
mod error;

pub use config::ForecastConfig;
pub use error::TidemarkError;

/// A convenience `Result` type for tidemark operations.
pub type Result<T> = std::result::Result<T, TidemarkError>;
