//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind a shared admission gate
//! - HTML parsing and content extraction
//! - Recursive, depth-bounded crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use parser::{parse_page, PageContent};
pub use scheduler::{Admission, Scheduler};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::sink::build_sink;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the configured sink
/// 2. Validate the seed and depth
/// 3. Traverse, publish and count until the task tree is exhausted
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - Absolute http(s) URL to start from
/// * `max_depth` - Maximum number of link hops from the seed
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl ran to completion
/// * `Err(HarvestError)` - Configuration was invalid; nothing was fetched
pub async fn crawl(
    config: &Config,
    seed: &str,
    max_depth: i64,
) -> Result<CrawlSummary, HarvestError> {
    let sink = build_sink(&config.sink);
    Coordinator::new(config.clone(), sink)
        .crawl(seed, max_depth)
        .await
}
