//! Best-effort publishing of a page's artifacts
//!
//! Every page yields one text artifact plus one artifact per image. Each
//! artifact succeeds or fails on its own; nothing here is ever returned
//! as an error to the traversal.

use crate::config::CaptureMode;
use crate::crawler::{Fetcher, PageContent};
use crate::output::artifact::{
    image_artifact_name, text_artifact_name, Artifact, IMAGE_MIME, TEXT_MIME,
};
use crate::sink::ArtifactSink;
use futures::future::join_all;
use std::sync::Arc;
use url::Url;

/// What happened to one page's artifacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Artifacts the sink accepted
    pub stored: u64,

    /// Artifacts that could not be produced or stored
    pub failed: u64,
}

impl PublishReport {
    fn record(&mut self, ok: bool) {
        if ok {
            self.stored += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Turns fetched pages into artifacts and hands them to the sink
pub struct Publisher {
    fetcher: Fetcher,
    sink: Arc<dyn ArtifactSink>,
    capture: CaptureMode,
}

impl Publisher {
    pub fn new(fetcher: Fetcher, sink: Arc<dyn ArtifactSink>, capture: CaptureMode) -> Self {
        Self {
            fetcher,
            sink,
            capture,
        }
    }

    /// Publishes the text artifact and every image of a page
    ///
    /// Images are downloaded concurrently through the fetcher, so they share
    /// the crawl's admission limit.
    pub async fn publish(&self, url: &Url, html: &str, content: &PageContent) -> PublishReport {
        let mut report = PublishReport::default();

        report.record(self.publish_text(url, html, content).await);

        let images = join_all(content.images.iter().map(|image| self.publish_image(image))).await;
        for ok in images {
            report.record(ok);
        }

        report
    }

    async fn publish_text(&self, url: &Url, html: &str, content: &PageContent) -> bool {
        let Some(name) = text_artifact_name(url) else {
            tracing::warn!("No artifact name for {}, skipping text", url);
            return false;
        };

        let bytes = match self.capture {
            CaptureMode::Raw => html.as_bytes().to_vec(),
            CaptureMode::Extracted => content.render_text().into_bytes(),
        };

        self.store(Artifact::new(name, bytes, TEXT_MIME)).await
    }

    async fn publish_image(&self, image: &Url) -> bool {
        let Some(name) = image_artifact_name(image) else {
            tracing::warn!("Image URL {} has no file name, skipping", image);
            return false;
        };

        let bytes = match self.fetcher.fetch_bytes(image).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(retryable = e.is_retryable(), "Image download failed: {}", e);
                return false;
            }
        };

        self.store(Artifact::new(name, bytes, IMAGE_MIME)).await
    }

    async fn store(&self, artifact: Artifact) -> bool {
        match self.sink.store(&artifact).await {
            Ok(id) => {
                tracing::debug!("Stored {} as {}", artifact.name, id);
                true
            }
            Err(e) => {
                tracing::warn!(
                    transient = e.is_transient(),
                    "Failed to store {}: {}",
                    artifact.name,
                    e
                );
                false
            }
        }
    }
}
