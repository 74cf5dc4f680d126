//! Task outcome definitions for tracking crawl progress
//!
//! Every crawl task ends in exactly one of these outcomes.

use crate::crawler::FetchError;
use std::fmt;

/// How a single crawl task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    // ===== Success =====
    /// Page was fetched, parsed and handed to the publisher
    Processed,

    // ===== Skips =====
    /// Task arrived with no depth left and was discarded
    DepthExhausted,

    /// Another branch had already claimed the URL
    AlreadyClaimed,

    // ===== Fetch Failures =====
    /// Request exceeded the fetch timeout
    TimedOut,

    /// Connection could not be established or broke mid-request
    Unreachable,

    /// Server answered with a non-2xx status
    HttpError,

    /// Response body could not be read as text
    DecodeFailed,
}

impl TaskOutcome {
    /// Number of distinct outcomes
    pub const COUNT: usize = 7;

    /// Returns true if this represents a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the task was discarded without any network activity
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::DepthExhausted | Self::AlreadyClaimed)
    }

    /// Returns true if this represents a fetch failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::TimedOut | Self::Unreachable | Self::HttpError | Self::DecodeFailed
        )
    }

    /// Stable identifier used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DepthExhausted => "depth_exhausted",
            Self::AlreadyClaimed => "already_claimed",
            Self::TimedOut => "timed_out",
            Self::Unreachable => "unreachable",
            Self::HttpError => "http_error",
            Self::DecodeFailed => "decode_failed",
        }
    }

    /// Dense index, used for counter tables
    pub fn index(&self) -> usize {
        match self {
            Self::Processed => 0,
            Self::DepthExhausted => 1,
            Self::AlreadyClaimed => 2,
            Self::TimedOut => 3,
            Self::Unreachable => 4,
            Self::HttpError => 5,
            Self::DecodeFailed => 6,
        }
    }

    /// Returns all possible outcomes, in index order
    pub fn all() -> [Self; Self::COUNT] {
        [
            Self::Processed,
            Self::DepthExhausted,
            Self::AlreadyClaimed,
            Self::TimedOut,
            Self::Unreachable,
            Self::HttpError,
            Self::DecodeFailed,
        ]
    }
}

impl From<&FetchError> for TaskOutcome {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Timeout { .. } => Self::TimedOut,
            FetchError::Connection { .. } => Self::Unreachable,
            FetchError::Status { .. } => Self::HttpError,
            FetchError::Decode { .. } => Self::DecodeFailed,
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
