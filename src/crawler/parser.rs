//! HTML parser for extracting page content and outgoing references
//!
//! This module turns fetched HTML into a `PageContent` record:
//! - Title, headings and body text, read only from content regions
//! - Links to follow (from `<a>` tags anywhere in the document)
//! - Image and video sources
//!
//! Parsing never fails. Malformed markup is repaired by the HTML5 parser
//! and the worst case is an empty record.

use crate::url::resolve;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Elements whose text never counts as page content
const STRIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside",
];

/// Elements that start a new line when flattened to text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

/// Structured content extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// The page title (from the first `<title>` tag)
    pub title: Option<String>,

    /// Text of every h1/h2/h3, in document order
    pub headings: Vec<String>,

    /// Article text, or paragraph texts one per line
    pub body_text: String,

    /// Absolute http(s) URLs of `<a href>` targets
    pub links: BTreeSet<Url>,

    /// Absolute http(s) URLs of `<img src>` targets
    pub images: BTreeSet<Url>,

    /// Raw `<video src>` values, unresolved
    pub videos: BTreeSet<String>,
}

impl PageContent {
    /// Renders title, headings and body as plain text
    ///
    /// Sections are separated by a blank line and empty sections are left
    /// out entirely.
    pub fn render_text(&self) -> String {
        let mut sections = Vec::with_capacity(3);

        if let Some(title) = &self.title {
            sections.push(title.clone());
        }
        if !self.headings.is_empty() {
            sections.push(self.headings.join("\n"));
        }
        if !self.body_text.is_empty() {
            sections.push(self.body_text.clone());
        }

        sections.join("\n\n")
    }
}

/// Parses HTML content and extracts the page record
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page's own URL, used to resolve relative references
///
/// # Example
///
/// ```no_run
/// use page_harvest::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let content = parse_page(html, &base_url);
/// assert_eq!(content.title, Some("Test".to_string()));
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        title: extract_title(&document),
        headings: extract_headings(&document),
        body_text: extract_body(&document),
        links: extract_urls(&document, "a[href]", "href", base_url),
        images: extract_urls(&document, "img[src]", "src", base_url),
        videos: extract_videos(&document),
    }
}

fn is_stripped(name: &str) -> bool {
    STRIPPED_ELEMENTS.contains(&name)
}

/// Returns true if the element sits inside a non-content region
fn in_stripped_region(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|parent| is_stripped(parent.name()))
    })
}

/// Appends the element's text, skipping non-content descendants
///
/// Block-level children are put on lines of their own.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) if !is_stripped(inner.name()) => {
                let block = BLOCK_ELEMENTS.contains(&inner.name());
                if block {
                    out.push('\n');
                }
                if let Some(inner) = ElementRef::wrap(child) {
                    collect_text(inner, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Flattened text of an element, one trimmed non-empty line per line
fn content_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Content elements matching `selector`, in document order
fn content_elements<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| !in_stripped_region(element))
        .collect()
}

fn extract_title(document: &Html) -> Option<String> {
    content_elements(document, "title")
        .into_iter()
        .next()
        .map(content_text)
        .filter(|s| !s.is_empty())
}

fn extract_headings(document: &Html) -> Vec<String> {
    content_elements(document, "h1, h2, h3")
        .into_iter()
        .map(content_text)
        .filter(|s| !s.is_empty())
        .collect()
}

fn extract_body(document: &Html) -> String {
    if let Some(article) = content_elements(document, "article").into_iter().next() {
        return content_text(article);
    }

    content_elements(document, "p")
        .into_iter()
        .map(content_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves `attr` of every element matching `selector`
///
/// Unlike text, references are taken from the whole document, so links in
/// navigation bars and footers are still followed.
fn extract_urls(document: &Html, selector: &str, attr: &str, base_url: &Url) -> BTreeSet<Url> {
    let mut urls = BTreeSet::new();

    if let Ok(selector) = Selector::parse(selector) {
        for element in document.select(&selector) {
            let Some(reference) = element.value().attr(attr) else {
                continue;
            };
            let reference = reference.trim();
            if reference.is_empty() {
                continue;
            }

            match resolve(base_url, reference) {
                Some(url) => {
                    urls.insert(url);
                }
                None => tracing::debug!("Dropping reference {:?} on {}", reference, base_url),
            }
        }
    }

    urls
}

fn extract_videos(document: &Html) -> BTreeSet<String> {
    let Ok(selector) = Selector::parse("video[src]") else {
        return BTreeSet::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect()
}
