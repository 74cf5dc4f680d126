use serde::Deserialize;

/// Default crawl depth, counted in link hops from the seed
pub const DEFAULT_MAX_DEPTH: i64 = 2;

/// Default number of HTTP requests allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_FETCHES: u32 = 16;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default identification header sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default directory artifacts are written to
pub const DEFAULT_DESTINATION: &str = "./harvest";

/// Main configuration structure for Page-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetcher: FetcherConfig,
    pub sink: SinkConfig,
}

/// Traversal configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of link hops to follow from the seed
    #[serde(rename = "max-depth")]
    pub max_depth: i64,

    /// Maximum number of HTTP requests in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// What goes into each page's text artifact
    pub capture: CaptureMode,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            capture: CaptureMode::default(),
        }
    }
}

/// Content stored in the per-page text artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// The fetched HTML, byte for byte
    Raw,
    /// The rendered extraction (title, headings, body)
    #[default]
    Extracted,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Value of the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Storage sink configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Which sink implementation receives artifacts
    pub kind: SinkKind,

    /// Logical destination (a directory for the directory sink)
    pub destination: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            destination: DEFAULT_DESTINATION.to_string(),
        }
    }
}

/// Available sink implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Write artifacts as files into a directory
    #[default]
    Directory,
    /// Log and drop every artifact
    Discard,
}
