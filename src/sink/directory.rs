//! Filesystem sink writing each artifact into one directory

use crate::output::Artifact;
use crate::sink::traits::{ArtifactSink, SinkError, SinkResult};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Writes artifacts as flat files under a base directory
///
/// The directory is created on first use. Writing a name that already
/// exists overwrites the previous file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    base_path: PathBuf,
}

impl DirectorySink {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Maps an artifact name to a path inside the base directory
    ///
    /// Names must be a single plain path component.
    fn path_for(&self, name: &str) -> SinkResult<PathBuf> {
        let has_separator = name.contains(|c| c == '/' || c == '\\');
        if name.is_empty() || name == "." || name == ".." || has_separator {
            return Err(SinkError::Rejected(format!("unusable file name {:?}", name)));
        }
        Ok(self.base_path.join(name))
    }
}

fn classify_io(error: io::Error) -> SinkError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        SinkError::Auth(error.to_string())
    } else {
        SinkError::Io(error)
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn store(&self, artifact: &Artifact) -> SinkResult<String> {
        let path = self.path_for(&artifact.name)?;

        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(classify_io)?;
        tokio::fs::write(&path, &artifact.bytes)
            .await
            .map_err(classify_io)?;

        tracing::debug!("Wrote {} bytes to {}", artifact.bytes.len(), path.display());
        Ok(path.display().to_string())
    }

    fn describe(&self) -> String {
        format!("directory {}", self.base_path.display())
    }
}
