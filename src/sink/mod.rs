//! Sink module for storing harvested artifacts
//!
//! This module handles:
//! - The `ArtifactSink` trait every destination implements
//! - A directory sink writing plain files
//! - A discard sink for dry crawls

mod directory;
mod discard;
mod traits;

pub use directory::DirectorySink;
pub use discard::DiscardSink;
pub use traits::{ArtifactSink, SinkError, SinkResult};

use crate::config::{SinkConfig, SinkKind};
use std::sync::Arc;

/// Builds the sink described by the configuration
///
/// # Arguments
///
/// * `config` - The sink section of the configuration
///
/// # Returns
///
/// A sink ready to be shared across crawl branches
pub fn build_sink(config: &SinkConfig) -> Arc<dyn ArtifactSink> {
    match config.kind {
        SinkKind::Directory => Arc::new(DirectorySink::new(&config.destination)),
        SinkKind::Discard => Arc::new(DiscardSink),
    }
}
