//! Markdown to HTML conversion.
//!
//! Supports a small dialect: `#`..`###` headings, `**strong**`, `*em*`,
//! `` `code` ``, fenced code blocks, `-` and `1.` lists and `[text](url)`
//! links. Every other non-blank line becomes its own paragraph. Anything the
//! dialect doesn't recognise passes through verbatim, so conversion can't
//! fail.
//!
//! Conversion is two-phase: lines are grouped into blocks first, then inline
//! rules run on the text of each heading, list item and paragraph. Code
//! blocks and code spans are escaped and never see the inline rules.

use std::sync::LazyLock;

use regex::Regex;

const FENCE: &str = "```";

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(\w+)?\s*$").expect("valid regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.+)$").expect("valid regex"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- (.+)$").expect("valid regex"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\. (.+)$").expect("valid regex"));

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// A block-level element, borrowing its text from the source.
#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    Heading { level: usize, text: &'a str },
    Code(Vec<&'a str>),
    List { kind: ListKind, items: Vec<&'a str> },
    Paragraph(&'a str),
}

impl Block<'_> {
    fn to_html(&self) -> String {
        match self {
            Block::Heading { level, text } => {
                format!("<h{level}>{}</h{level}>", render_inline(text))
            }
            Block::Code(lines) => {
                let body: String = lines
                    .iter()
                    .map(|line| format!("{}\n", html_escape(line)))
                    .collect();
                format!("<pre><code>{body}</code></pre>")
            }
            Block::List { kind, items } => {
                let tag = kind.tag();
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>\n", render_inline(item)))
                    .collect();
                format!("<{tag}>\n{items}</{tag}>")
            }
            Block::Paragraph(text) => format!("<p>{}</p>", render_inline(text)),
        }
    }
}

/// Render a markdown body to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    parse_blocks(markdown)
        .iter()
        .map(Block::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group lines into blocks.
fn parse_blocks(markdown: &str) -> Vec<Block<'_>> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        // An unclosed fence is just text
        if FENCE_OPEN.is_match(line) {
            if let Some(len) = lines[i + 1..]
                .iter()
                .position(|l| l.trim_end() == FENCE)
            {
                blocks.push(Block::Code(lines[i + 1..i + 1 + len].to_vec()));
                i += len + 2;
                continue;
            }
        }

        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps.get(1).map_or(1, |m| m.len());
            let text = caps.get(2).map_or("", |m| m.as_str());
            blocks.push(Block::Heading { level, text });
            i += 1;
            continue;
        }

        if let Some((kind, first)) = list_item(line) {
            let mut items = vec![first];
            i += 1;
            while let Some((next_kind, item)) = lines.get(i).and_then(|l| list_item(*l)) {
                if next_kind != kind {
                    break;
                }
                items.push(item);
                i += 1;
            }
            blocks.push(Block::List { kind, items });
            continue;
        }

        blocks.push(Block::Paragraph(line));
        i += 1;
    }

    blocks
}

/// Classify a list item line and return its text.
fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = UNORDERED_ITEM.captures(line) {
        return caps.get(1).map(|m| (ListKind::Unordered, m.as_str()));
    }
    ORDERED_ITEM
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str()))
}

/// Apply the inline rules to a single line of text.
///
/// Code spans are cut out first so their content stays literal.
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in CODE_SPAN.captures_iter(text) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&render_spans(&text[last..whole.start()]));
        out.push_str("<code>");
        out.push_str(&html_escape(code.as_str()));
        out.push_str("</code>");
        last = whole.end();
    }
    out.push_str(&render_spans(&text[last..]));

    out
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Strong before emphasis, so `*` never eats half of a `**` pair.
fn render_spans(text: &str) -> String {
    let text = STRONG.replace_all(text, "<strong>${1}</strong>");
    let text = EMPHASIS.replace_all(&text, "<em>${1}</em>");
    LINK.replace_all(&text, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}
