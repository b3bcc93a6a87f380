//! Document types for pipeline processing.

use crate::build::document::Document;
use crate::build::summary::PageSummary;

/// A document being processed through the pipeline.
///
/// Wraps the original `Document` with mutable state that evolves
/// through pipeline stages:
///
/// 1. Initially: `content` = markdown body
/// 2. After markdown: `content` = HTML fragment
/// 3. After template: `output_html` = final page HTML
#[derive(Debug)]
pub struct ProcessingDocument {
    /// The original document (front matter and body)
    pub doc: Document,

    /// Summary used by listings, tag pages, the feed and search.
    ///
    /// Computed once up front; no stage changes it.
    pub summary: PageSummary,

    /// Content being processed.
    pub content: String,

    /// Final HTML output after template rendering.
    ///
    /// None until the template stage populates it.
    pub output_html: Option<String>,
}

impl ProcessingDocument {
    pub fn new(doc: Document, summary: PageSummary) -> Self {
        let content = doc.body.clone();
        Self {
            doc,
            summary,
            content,
            output_html: None,
        }
    }

    /// Site-relative URL of the rendered page.
    pub fn url(&self) -> &str {
        &self.summary.url
    }
}
