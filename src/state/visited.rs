//! Shared registry of URLs claimed during one crawl run

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use url::Url;

/// Concurrency-safe set of URLs already scheduled or completed
///
/// The registry is the only mutable state shared between crawl branches.
/// Cloning it is cheap and every clone refers to the same underlying set.
/// It only ever grows; entries are never removed during a run.
#[derive(Debug, Clone, Default)]
pub struct VisitedRegistry {
    claimed: Arc<Mutex<HashSet<String>>>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL for fetching
    ///
    /// The check and the insert happen under one lock, so when several
    /// branches discover the same link at the same moment exactly one of
    /// them gets `true`.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was unclaimed and now belongs to the caller
    /// * `false` - Someone else already claimed it; the caller must skip it
    pub fn try_claim(&self, url: &Url) -> bool {
        self.lock().insert(url.as_str().to_string())
    }

    /// Returns true if the URL has been claimed
    pub fn contains(&self, url: &Url) -> bool {
        self.lock().contains(url.as_str())
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the set half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.claimed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
