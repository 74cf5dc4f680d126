//! Sink trait and error types
//!
//! A sink is wherever artifacts end up. The crawl constructs one sink per
//! run and shares it between all branches, so implementations must be
//! safe to call concurrently.

use crate::output::Artifact;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while storing an artifact
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink refused our credentials or we lack permission
    #[error("Not authorized: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact itself is unacceptable (e.g. an unusable name)
    #[error("Artifact rejected: {0}")]
    Rejected(String),
}

impl SinkError {
    /// Returns true if storing the same artifact again might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for harvested artifacts
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Stores an artifact and returns the identifier the sink assigned it
    ///
    /// Storing an artifact whose name already exists replaces it.
    async fn store(&self, artifact: &Artifact) -> SinkResult<String>;

    /// Short human-readable description used in logs
    fn describe(&self) -> String;
}
