//! Artifacts and their naming rules

use crate::url::host_slug;
use url::Url;

/// Mime type of the per-page text artifact
pub const TEXT_MIME: &str = "text/plain";

/// Mime type recorded for every image, whatever its real format
pub const IMAGE_MIME: &str = "image/jpeg";

/// A named blob handed to a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Name of the text artifact for a page: `{host_slug}_content.txt`
///
/// Derived from the host alone, so every page of a site maps to the same
/// name and later pages replace earlier ones.
pub fn text_artifact_name(url: &Url) -> Option<String> {
    host_slug(url).map(|slug| format!("{}_content.txt", slug))
}

/// Name of an image artifact: the last segment of the URL path
///
/// Returns None when the path ends in a slash or has no segments.
pub fn image_artifact_name(url: &Url) -> Option<String> {
    url.path_segments()?
        .last()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_artifact_name_is_stable() {
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(
            text_artifact_name(&url),
            Some("example_com_content.txt".to_string())
        );

        let again = Url::parse("https://example.com").unwrap();
        assert_eq!(text_artifact_name(&url), text_artifact_name(&again));
    }

    #[test]
    fn test_text_artifact_name_ignores_path() {
        let url = Url::parse("https://www.example.com/deep/page.html?q=1").unwrap();
        assert_eq!(
            text_artifact_name(&url),
            Some("www_example_com_content.txt".to_string())
        );
    }

    #[test]
    fn test_image_artifact_name() {
        let url = Url::parse("https://example.com/img/logo.jpg?v=2").unwrap();
        assert_eq!(image_artifact_name(&url), Some("logo.jpg".to_string()));

        let url = Url::parse("https://example.com/img/").unwrap();
        assert_eq!(image_artifact_name(&url), None);

        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(image_artifact_name(&url), None);
    }
}
