pub mod aggregator;
pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod paginator;
pub mod processor;
#[cfg(test)]
mod tests;

pub use api::serve;
pub use client::{ClobClient, PageQuery, TradeSource};
pub use constants::*;
pub use error::Error;
pub use models::*;
pub use processor::{ReportRequest, StatsProcessor};

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
