use std::collections::BTreeMap;
use std::path::PathBuf;

use super::paths::sanitize_segment;

/// Placeholder title for documents without a `title` key.
pub const UNTITLED: &str = "untitled";

/// The marker that opens and closes a metadata block.
const DELIMITER: &str = "---";

// =============================================================================
// Front matter
// =============================================================================

/// Front matter metadata parsed from the document.
///
/// A flat `key: value` mapping. Values are kept as strings; typed access
/// goes through the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Look up a raw metadata value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    /// The parsed `tags` list (empty if the key is absent).
    pub fn tags(&self) -> Vec<String> {
        self.get("tags").map(parse_tag_list).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of splitting a raw document into metadata and body.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed front matter (empty if none found)
    pub front_matter: FrontMatter,
    /// The body without the metadata block, trimmed
    pub body: String,
}

/// Split a raw document into its front matter and body.
///
/// The metadata block must open with a `---` line at the very start of the
/// text and close with the next line that is exactly `---`:
///
/// ```markdown
/// ---
/// title: Hello
/// date: 2024-01-01
/// tags: [intro, rust]
/// ---
/// # Body starts here
/// ```
///
/// Without an opening or closing marker the whole input is the body.
pub fn split_front_matter(content: &str) -> ParsedContent {
    let no_front_matter = || ParsedContent {
        front_matter: FrontMatter::default(),
        body: content.to_string(),
    };

    let mut lines = content.split_inclusive('\n');
    let Some(opening) = lines.next().filter(|line| is_delimiter(line)) else {
        return no_front_matter();
    };

    let mut offset = opening.len();
    for line in lines {
        if is_delimiter(line) {
            let block = &content[opening.len()..offset];
            let body = content[offset + line.len()..].trim().to_string();
            return ParsedContent {
                front_matter: parse_metadata_block(block),
                body,
            };
        }
        offset += line.len();
    }

    no_front_matter()
}

/// A delimiter is a line holding exactly `---`.
fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

/// Parse `key: value` lines. Lines without a colon are ignored and later
/// keys overwrite earlier ones.
fn parse_metadata_block(block: &str) -> FrontMatter {
    let mut fields = BTreeMap::new();

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    FrontMatter { fields }
}

/// Remove one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse a tag value of the form `[a, b, c]` into trimmed, non-empty tags.
///
/// Brackets are optional: `a, b` parses the same way.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(['[', ']', ','])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Documents
// =============================================================================

/// One input document, split and ready for conversion.
#[derive(Debug, Clone)]
pub struct Document {
    /// Output slug derived from the file name (e.g., "hello-world")
    pub slug: String,
    /// Path of the input file relative to the posts directory
    pub source_path: PathBuf,
    /// Front matter metadata
    pub front_matter: FrontMatter,
    /// Markdown body without the metadata block
    pub body: String,
}

impl Document {
    /// Build a document from an input file name and its raw text.
    pub fn parse(source_path: PathBuf, raw: &str) -> Self {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = split_front_matter(raw);
        if parsed.front_matter.is_empty() {
            tracing::debug!("{} has no front matter", source_path.display());
        }

        Self {
            slug: sanitize_segment(&stem),
            source_path,
            front_matter: parsed.front_matter,
            body: parsed.body,
        }
    }

    /// Get the document title, falling back to the placeholder.
    pub fn title(&self) -> String {
        self.front_matter
            .title()
            .unwrap_or(UNTITLED)
            .to_string()
    }

    /// The site-relative URL this document's page is written to.
    pub fn url(&self) -> String {
        format!("posts/{}.html", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter_basic() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: [intro]\n---\n# Hi\nBody text.";
        let parsed = split_front_matter(content);
        assert_eq!(parsed.front_matter.title(), Some("Hello"));
        assert_eq!(parsed.front_matter.date(), Some("2024-01-01"));
        assert_eq!(parsed.front_matter.tags(), vec!["intro"]);
        assert_eq!(parsed.body, "# Hi\nBody text.");
    }

    #[test]
    fn test_split_front_matter_no_front_matter() {
        let content = "# Just Markdown\n\nNo front matter here.";
        let parsed = split_front_matter(content);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_split_front_matter_not_at_start() {
        let content = "\n---\ntitle: Late\n---\nbody";
        let parsed = split_front_matter(content);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_split_front_matter_unclosed() {
        let content = "---\ntitle: Never closed\n# Heading";
        let parsed = split_front_matter(content);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_delimiter_must_be_a_whole_line() {
        let parsed = split_front_matter("----\ntitle: A\n---\nbody");
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, "----\ntitle: A\n---\nbody");

        let parsed = split_front_matter("---\ntitle: A\n--- not yet\n----\n---\nbody");
        assert_eq!(parsed.front_matter.title(), Some("A"));
        assert_eq!(parsed.body, "body");

        let parsed = split_front_matter("---\r\ntitle: B\r\n---\r\nbody");
        assert_eq!(parsed.front_matter.title(), Some("B"));
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_split_front_matter_empty_block() {
        let parsed = split_front_matter("---\n---\n\n# Content");
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, "# Content");
    }

    #[test]
    fn test_value_keeps_later_colons_and_dashes() {
        let parsed = split_front_matter("---\ntitle: Rust: a---b\n---\nbody");
        assert_eq!(parsed.front_matter.title(), Some("Rust: a---b"));
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_metadata_quotes_and_duplicates() {
        let content = "---\ntitle: \"First\"\nnote: 'single'\nno colon here\ntitle: \"Second\"\n---\n";
        let parsed = split_front_matter(content);
        assert_eq!(parsed.front_matter.title(), Some("Second"));
        assert_eq!(parsed.front_matter.get("note"), Some("single"));
        assert_eq!(parsed.front_matter.get("no colon here"), None);
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_unquote_only_matching_pair() {
        assert_eq!(unquote("\"quoted\""), "quoted");
        assert_eq!(unquote("'it's'"), "it's");
        assert_eq!(unquote("\"half"), "\"half");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(parse_tag_list("[go, rust]"), vec!["go", "rust"]);
        assert_eq!(parse_tag_list("[ a ,, b , ]"), vec!["a", "b"]);
        assert_eq!(parse_tag_list("solo"), vec!["solo"]);
        assert!(parse_tag_list("[]").is_empty());
        assert!(parse_tag_list("").is_empty());
    }

    #[test]
    fn test_document_defaults() {
        let doc = Document::parse(PathBuf::from("first post.md"), "just a body");
        assert_eq!(doc.slug, "first-post");
        assert_eq!(doc.title(), UNTITLED);
        assert_eq!(doc.url(), "posts/first-post.html");
        assert!(doc.front_matter.tags().is_empty());
    }
}
