//! Configuration type definitions.
//!
//! This module contains all the data structures used in `quire.yaml`.
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::build::aggregate::DEFAULT_FEED_LIMIT;
use crate::build::excerpt::DEFAULT_EXCERPT_LENGTH;

// =============================================================================
// Top-level config
// =============================================================================

/// Site configuration, as read from `quire.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    /// Short line shown under the site title
    #[serde(default)]
    pub tagline: Option<String>,
    /// Feed channel description
    #[serde(default)]
    pub description: String,
    /// Absolute base URL (e.g., "https://blog.example"), used for feed links
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            tagline: None,
            description: String::new(),
            url: None,
            language: default_language(),
            output: default_output(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

// =============================================================================
// Content configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the `*.md` posts
    #[serde(default = "default_posts")]
    pub posts: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts: default_posts(),
        }
    }
}

fn default_posts() -> PathBuf {
    PathBuf::from("_posts")
}

// =============================================================================
// Build configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Maximum excerpt length in characters
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    /// Fail the build when a post has no valid `date`
    #[serde(default)]
    pub require_date: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            excerpt_length: default_excerpt_length(),
            require_date: false,
        }
    }
}

fn default_excerpt_length() -> usize {
    DEFAULT_EXCERPT_LENGTH
}

// =============================================================================
// Feed configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Output path of the feed, relative to the output directory
    #[serde(default = "default_feed_path")]
    pub path: String,
    /// Number of most recent posts in the feed
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_feed_path(),
            limit: default_feed_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_feed_path() -> String {
    "feed.xml".to_string()
}

fn default_feed_limit() -> usize {
    DEFAULT_FEED_LIMIT
}

// =============================================================================
// Theme configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Directory with a `templates/` folder overriding the built-in theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
