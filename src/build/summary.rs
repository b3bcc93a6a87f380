//! Per-document summaries used for listings, tags, the feed and search.

use chrono::NaiveDate;
use serde::Serialize;

use super::document::Document;
use super::excerpt::excerpt;

/// The only date format documents may use.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lightweight record describing one rendered page.
///
/// This is also the record the client-side search reads, so the serialized
/// field names are part of the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub title: String,
    /// `YYYY-MM-DD`, compared as a string
    pub date: String,
    /// Site-relative URL of the page (e.g., "posts/hello.html")
    pub url: String,
    pub excerpt: String,
    /// Tags in first-seen order, without duplicates
    pub tags: Vec<String>,
}

impl PageSummary {
    /// Summarize a document.
    ///
    /// `today` fills in a missing date, so a fixed value makes the whole run
    /// reproducible.
    pub fn from_document(doc: &Document, today: NaiveDate, excerpt_length: usize) -> Self {
        let date = doc
            .front_matter
            .date()
            .map(str::to_string)
            .unwrap_or_else(|| today.format(DATE_FORMAT).to_string());

        let mut tags: Vec<String> = Vec::new();
        for tag in doc.front_matter.tags() {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self {
            title: doc.title(),
            date,
            url: doc.url(),
            excerpt: excerpt(&doc.body, excerpt_length),
            tags,
        }
    }

    /// The date as a calendar date, if it is well-formed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields; the string ordering relies on padding
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    #[test]
    fn test_summary_from_front_matter() {
        let doc = Document::parse(
            PathBuf::from("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\ntags: [intro, rust, intro]\n---\n# Hi\nBody text.",
        );
        let summary = PageSummary::from_document(&doc, today(), 150);
        assert_eq!(summary.title, "Hello");
        assert_eq!(summary.date, "2024-01-01");
        assert_eq!(summary.url, "posts/hello.html");
        assert_eq!(summary.excerpt, "# Hi");
        assert_eq!(summary.tags, vec!["intro", "rust"]);
    }

    #[test]
    fn test_missing_date_uses_injected_today() {
        let doc = Document::parse(PathBuf::from("undated.md"), "---\ntitle: Undated\n---\nbody");
        let summary = PageSummary::from_document(&doc, today(), 150);
        assert_eq!(summary.date, "2025-03-09");
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let doc = Document::parse(PathBuf::from("bare.md"), "body only");
        let summary = PageSummary::from_document(&doc, today(), 150);
        assert_eq!(summary.title, "untitled");
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-1-5"), None);
        assert_eq!(parse_date("Jan 5, 2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_serializes_search_fields() {
        let doc = Document::parse(PathBuf::from("a.md"), "---\ntitle: A\ndate: 2024-01-01\n---\nx");
        let summary = PageSummary::from_document(&doc, today(), 150);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "A",
                "date": "2024-01-01",
                "url": "posts/a.html",
                "excerpt": "x",
                "tags": [],
            })
        );
    }
}
