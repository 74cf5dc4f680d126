//! URL handling module for Page-Harvest
//!
//! This module provides relative-reference resolution, crawl-target validation
//! and host slugs used for artifact naming.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, host_slug};
pub use resolve::{is_crawlable, parse_seed_url, resolve};
