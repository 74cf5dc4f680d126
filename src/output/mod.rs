//! Output module for everything a crawl produces
//!
//! This module handles:
//! - Artifacts and their naming rules
//! - Publishing a page's artifacts to the sink
//! - Crawl counters and the final summary

mod artifact;
mod publisher;
pub mod stats;

pub use artifact::{image_artifact_name, text_artifact_name, Artifact, IMAGE_MIME, TEXT_MIME};
pub use publisher::{PublishReport, Publisher};
pub use stats::{print_summary, CrawlStats, CrawlSummary};
