//! Pulls a shop's reviews from the Etsy Open API and exports them as CSV.

pub mod clients;
pub mod config;
pub mod error;
pub mod extractors;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{Error, Result};
pub use services::{EtsyApi, ReviewHarvester};
pub use storage::CsvExporter;

/// Installs the global `tracing` subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
