//! Page-Harvest: a depth-bounded content harvester
//!
//! This crate implements a web crawler that follows hyperlinks from a seed URL
//! up to a fixed depth, extracts structured content from every page it fetches
//! and hands the resulting artifacts (page text and referenced images) to a
//! storage sink.

pub mod config;
pub mod crawler;
pub mod output;
pub mod sink;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Harvest operations
///
/// Only configuration-time failures surface through this type from a crawl;
/// everything that goes wrong while traversing is logged and counted instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(#[from] UrlError),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Page-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, PageContent};
pub use output::CrawlSummary;
pub use state::{CrawlTask, VisitedRegistry};
pub use self::url::{parse_seed_url, resolve};
