//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - User-supplied names (file stems, tags) and safe path segments
//! - Site-relative URLs (the links pages use)
//! - Output file paths (where files are written in the output directory)

use std::path::{Path, PathBuf};

/// Characters that never appear in a generated path segment.
const UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '#', '%', '&', '\''];

/// Turn a user-supplied string into a single safe path segment.
///
/// Path-unsafe characters, whitespace and control characters become `-`;
/// leading dots and dashes are removed so a segment can't escape its
/// directory or turn into a hidden file. An empty result becomes `_`.
///
/// # Examples
/// ```ignore
/// sanitize_segment("rust") => "rust"
/// sanitize_segment("c/c++") => "c-c++"
/// sanitize_segment("../etc") => "-etc" => "etc"
/// ```
pub fn sanitize_segment(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| {
            if UNSAFE_CHARS.contains(&c) || c.is_whitespace() || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_start_matches(['.', '-']);
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File stem of the tag index, `tags/index.html`.
pub const TAG_INDEX_STEM: &str = "index";

/// Turn a tag into the path segment of its page.
///
/// Like [`sanitize_segment`], except a tag can never take the tag index's
/// name (compared case-insensitively for case-insensitive filesystems).
///
/// ```ignore
/// tag_slug("rust") => "rust"
/// tag_slug("index") => "index-"
/// ```
pub fn tag_slug(tag: &str) -> String {
    let slug = sanitize_segment(tag);
    if slug.eq_ignore_ascii_case(TAG_INDEX_STEM) {
        format!("{slug}-")
    } else {
        slug
    }
}

/// The site-relative URL of a tag page.
///
/// ```ignore
/// tag_url("rust") => "tags/rust.html"
/// ```
pub fn tag_url(tag_slug: &str) -> String {
    format!("tags/{tag_slug}.html")
}

/// Convert a site-relative URL to an output file path.
///
/// # Examples
/// ```ignore
/// url_to_output_path("posts/hello.html", output_dir) => output_dir/posts/hello.html
/// url_to_output_path("index.html", output_dir) => output_dir/index.html
/// ```
pub fn url_to_output_path(url: &str, output_dir: &Path) -> PathBuf {
    url.trim_start_matches('/')
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(output_dir.to_path_buf(), |path, part| path.join(part))
}

/// The prefix that leads from a page back to the site root.
///
/// ```ignore
/// root_prefix("index.html") => ""
/// root_prefix("posts/hello.html") => "../"
/// ```
pub fn root_prefix(url: &str) -> String {
    "../".repeat(url.trim_start_matches('/').matches('/').count())
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
