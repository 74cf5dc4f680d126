//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the recursive traversal that coordinates:
//! - Claiming URLs in the visited registry
//! - Fetching, parsing and publishing each page
//! - Fanning out to child links with one less hop of depth
//!
//! Every branch runs as its own tokio task. A parent waits for all of its
//! children, so the seed's future completes only once the whole task tree
//! has finished.

use crate::config::{validate_max_depth, Config};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_page;
use crate::crawler::scheduler::Scheduler;
use crate::output::{CrawlStats, CrawlSummary, Publisher};
use crate::sink::ArtifactSink;
use crate::state::{CrawlTask, TaskOutcome, VisitedRegistry};
use crate::url::parse_seed_url;
use crate::{ConfigError, HarvestError};
use chrono::Utc;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use std::sync::Arc;

/// Main crawler coordinator structure
///
/// A coordinator can run any number of crawls; each `crawl` call gets its
/// own registry, counters and admission gate.
pub struct Coordinator {
    config: Config,
    sink: Arc<dyn ArtifactSink>,
}

/// State shared by every branch of one crawl
struct CrawlRun {
    fetcher: Fetcher,
    publisher: Publisher,
    registry: VisitedRegistry,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawler configuration
    /// * `sink` - Where artifacts are stored
    pub fn new(config: Config, sink: Arc<dyn ArtifactSink>) -> Self {
        Self { config, sink }
    }

    /// Crawls from `seed`, following links up to `max_depth` hops
    ///
    /// Only configuration problems (bad seed, negative depth, unusable
    /// fetcher settings) are returned as errors, and always before any
    /// request is made. Failures during traversal are logged and counted
    /// in the summary.
    pub async fn crawl(&self, seed: &str, max_depth: i64) -> Result<CrawlSummary, HarvestError> {
        validate_max_depth(max_depth)?;
        let seed_url = parse_seed_url(seed).map_err(ConfigError::InvalidSeed)?;

        let scheduler = Scheduler::new(self.config.crawler.max_concurrent_fetches);
        let fetcher = Fetcher::new(&self.config.fetcher, scheduler)?;
        let run = Arc::new(CrawlRun {
            publisher: Publisher::new(
                fetcher.clone(),
                self.sink.clone(),
                self.config.crawler.capture,
            ),
            fetcher,
            registry: VisitedRegistry::new(),
            stats: CrawlStats::new(),
        });

        tracing::info!(
            "Starting crawl of {} (max depth {}, {} concurrent fetches, sink: {})",
            seed_url,
            max_depth,
            run.fetcher.scheduler().capacity(),
            self.sink.describe()
        );
        let started_at = Utc::now();

        run.clone()
            .explore(CrawlTask::seed(seed_url.clone(), max_depth))
            .await;

        let finished_at = Utc::now();
        let summary = run.stats.summarize(
            seed_url.as_str(),
            max_depth,
            started_at,
            finished_at,
            run.registry.len(),
        );

        tracing::info!(
            "Crawl complete: {} processed, {} skipped, {} failed, {} artifacts stored",
            run.stats.tally(TaskOutcome::is_success),
            run.stats.tally(TaskOutcome::is_skipped),
            run.stats.tally(TaskOutcome::is_error),
            summary.artifacts_stored
        );

        Ok(summary)
    }
}

impl CrawlRun {
    /// Processes one task and, recursively, everything reachable from it
    ///
    /// Boxed because the future is recursive.
    fn explore(self: Arc<Self>, task: CrawlTask) -> BoxFuture<'static, ()> {
        async move {
            if task.is_exhausted() {
                self.stats.record(TaskOutcome::DepthExhausted);
                return;
            }

            if !self.registry.try_claim(&task.url) {
                tracing::debug!("Already claimed: {}", task.url);
                self.stats.record(TaskOutcome::AlreadyClaimed);
                return;
            }

            let html = match self.fetcher.fetch(&task.url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(retryable = e.is_retryable(), "{}", e);
                    self.stats.record(TaskOutcome::from(&e));
                    return;
                }
            };

            let content = parse_page(&html, &task.url);
            self.stats.record(TaskOutcome::Processed);
            tracing::info!(
                "Fetched {} (depth left {}, {} links, {} images)",
                task.url,
                task.remaining_depth,
                content.links.len(),
                content.images.len()
            );

            let report = self.publisher.publish(&task.url, &html, &content).await;
            self.stats.record_publish(&report);

            let children: Vec<CrawlTask> = content
                .links
                .into_iter()
                .map(|link| task.child(link))
                .filter(|child| {
                    if child.is_exhausted() {
                        tracing::debug!("Not following {}: depth exhausted", child.url);
                        self.stats.record(TaskOutcome::DepthExhausted);
                        false
                    } else {
                        true
                    }
                })
                .collect();

            let handles: Vec<_> = children
                .into_iter()
                .map(|child| tokio::spawn(self.clone().explore(child)))
                .collect();

            for result in join_all(handles).await {
                if let Err(e) = result {
                    tracing::error!("Crawl branch below {} panicked: {}", task.url, e);
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::DiscardSink;

    fn coordinator() -> Coordinator {
        Coordinator::new(Config::default(), Arc::new(DiscardSink))
    }

    #[tokio::test]
    async fn test_negative_depth_rejected() {
        let result = coordinator().crawl("https://example.com/", -1).await;
        assert!(matches!(
            result,
            Err(HarvestError::Config(ConfigError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_invalid_seed_rejected() {
        for seed in ["not a url", "ftp://example.com/", "mailto:a@b.c"] {
            let result = coordinator().crawl(seed, 1).await;
            assert!(
                matches!(result, Err(HarvestError::Config(ConfigError::InvalidSeed(_)))),
                "{} should be rejected",
                seed
            );
        }
    }
}
