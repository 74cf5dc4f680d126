//! Crawl counters and the end-of-run summary
//!
//! Branches update `CrawlStats` concurrently through atomics; once the task
//! tree has finished the counters are frozen into a `CrawlSummary`.

use crate::output::publisher::PublishReport;
use crate::state::TaskOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by every branch of one crawl
#[derive(Debug, Default)]
pub struct CrawlStats {
    outcomes: [AtomicU64; TaskOutcome::COUNT],
    artifacts_stored: AtomicU64,
    publish_failures: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished task
    pub fn record(&self, outcome: TaskOutcome) {
        self.outcomes[outcome.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Adds one page's publish results
    pub fn record_publish(&self, report: &PublishReport) {
        self.artifacts_stored
            .fetch_add(report.stored, Ordering::Relaxed);
        self.publish_failures
            .fetch_add(report.failed, Ordering::Relaxed);
    }

    /// Current count for one outcome
    pub fn count(&self, outcome: TaskOutcome) -> u64 {
        self.outcomes[outcome.index()].load(Ordering::Relaxed)
    }

    /// Total count over every outcome accepted by `filter`
    pub fn tally(&self, filter: fn(&TaskOutcome) -> bool) -> u64 {
        TaskOutcome::all()
            .iter()
            .filter(|outcome| filter(outcome))
            .map(|outcome| self.count(*outcome))
            .sum()
    }

    /// Freezes the counters into a summary
    pub fn summarize(
        &self,
        seed: &str,
        max_depth: i64,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        urls_claimed: usize,
    ) -> CrawlSummary {
        CrawlSummary {
            seed: seed.to_string(),
            max_depth,
            started_at,
            finished_at,
            pages_fetched: self.count(TaskOutcome::Processed),
            timed_out: self.count(TaskOutcome::TimedOut),
            unreachable: self.count(TaskOutcome::Unreachable),
            http_errors: self.count(TaskOutcome::HttpError),
            decode_failures: self.count(TaskOutcome::DecodeFailed),
            already_claimed: self.count(TaskOutcome::AlreadyClaimed),
            depth_exhausted: self.count(TaskOutcome::DepthExhausted),
            artifacts_stored: self.artifacts_stored.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            urls_claimed: urls_claimed as u64,
        }
    }
}

/// Final report of a crawl run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub seed: String,
    pub max_depth: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Pages fetched and parsed successfully
    pub pages_fetched: u64,

    // Fetch failures by kind
    pub timed_out: u64,
    pub unreachable: u64,
    pub http_errors: u64,
    pub decode_failures: u64,

    /// Tasks dropped because another branch already claimed the URL
    pub already_claimed: u64,

    /// Links not followed because the depth budget ran out
    pub depth_exhausted: u64,

    pub artifacts_stored: u64,
    pub publish_failures: u64,

    /// Distinct URLs claimed (each fetched at most once)
    pub urls_claimed: u64,
}

impl CrawlSummary {
    /// Total fetch failures across all kinds
    pub fn fetch_failures(&self) -> u64 {
        self.timed_out + self.unreachable + self.http_errors + self.decode_failures
    }

    /// Wall-clock duration in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Run:");
    println!("  Seed: {}", summary.seed);
    println!("  Max depth: {}", summary.max_depth);
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Finished: {}", summary.finished_at.to_rfc3339());
    println!("  Duration: {}s", summary.duration_seconds());
    println!();

    println!("Pages:");
    println!("  Unique URLs claimed: {}", summary.urls_claimed);
    println!("  Fetched: {}", summary.pages_fetched);
    println!("  Duplicate claims: {}", summary.already_claimed);
    println!("  Beyond depth: {}", summary.depth_exhausted);
    println!();

    println!("Fetch Failures: {}", summary.fetch_failures());
    if summary.fetch_failures() > 0 {
        println!("  Timed out: {}", summary.timed_out);
        println!("  Unreachable: {}", summary.unreachable);
        println!("  HTTP errors: {}", summary.http_errors);
        println!("  Decode failures: {}", summary.decode_failures);
    }
    println!();

    println!("Artifacts:");
    println!("  Stored: {}", summary.artifacts_stored);
    println!("  Failed: {}", summary.publish_failures);
}
