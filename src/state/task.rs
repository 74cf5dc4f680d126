use url::Url;

/// A unit of traversal work: one URL with the hops still allowed below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// The page to fetch
    pub url: Url,

    /// Link hops still allowed from this page; below zero the task is dead
    pub remaining_depth: i64,
}

impl CrawlTask {
    /// Creates the root task of a crawl
    pub fn seed(url: Url, max_depth: i64) -> Self {
        Self {
            url,
            remaining_depth: max_depth,
        }
    }

    /// Creates the task for a link found on this task's page
    pub fn child(&self, url: Url) -> Self {
        Self {
            url,
            remaining_depth: self.remaining_depth - 1,
        }
    }

    /// Returns true if the task must not be executed
    pub fn is_exhausted(&self) -> bool {
        self.remaining_depth < 0
    }
}
