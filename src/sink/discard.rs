use crate::output::Artifact;
use crate::sink::traits::{ArtifactSink, SinkResult};
use async_trait::async_trait;

/// Sink that accepts everything and keeps nothing
///
/// Useful for dry crawls where only the traversal and the summary matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

#[async_trait]
impl ArtifactSink for DiscardSink {
    async fn store(&self, artifact: &Artifact) -> SinkResult<String> {
        tracing::debug!(
            "Discarding {} ({} bytes, {})",
            artifact.name,
            artifact.bytes.len(),
            artifact.mime_type
        );
        Ok(artifact.name.clone())
    }

    fn describe(&self) -> String {
        "discard".to_string()
    }
}
