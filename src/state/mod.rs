//! State module for tracking crawl progress
//!
//! This module provides the per-run state shared by crawl branches.
//!
//! # Components
//!
//! - `CrawlTask`: A URL paired with its remaining depth
//! - `VisitedRegistry`: The claim set guaranteeing each URL is fetched at most once
//! - `TaskOutcome`: How an individual task ended

mod outcome;
mod task;
mod visited;

// Re-export main types
pub use outcome::TaskOutcome;
pub use task::CrawlTask;
pub use visited::VisitedRegistry;
