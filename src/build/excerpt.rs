//! Plain-text teasers for listings, the feed and search.

use std::sync::LazyLock;

use regex::Regex;

/// Default excerpt length, in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

const ELLIPSIS: &str = "...";

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Build an excerpt from the first line of a raw markdown body.
///
/// Markup tags are stripped, then the text is cut to `limit` characters.
/// The ellipsis is only appended when something was cut off.
pub fn excerpt(body: &str, limit: usize) -> String {
    let first_line = body.lines().next().unwrap_or_default();
    let text = TAG.replace_all(first_line, "");

    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.into_owned(),
    }
}
