//! Configuration for both pipelines
//!
//! Every tuning value the crawlers depend on is a field here with the
//! empirically chosen default, so callers can adjust timing without
//! touching the algorithms.

pub mod discovery;
pub mod review;

pub use discovery::{DiscoveryConfig, GridPoint, PageTokenRetry};
pub use review::{ReviewCrawlConfig, ScrollSettings, TabSettings};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No Places API key: set it in the config file or the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
