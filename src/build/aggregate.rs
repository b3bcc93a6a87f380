//! Cross-document collections derived from the complete set of summaries.
//!
//! Aggregation runs once, after every document has been summarized. All
//! listings share one ordering: date descending, with ties kept in input
//! order. Dates are compared as strings, which matches calendar order
//! because they are zero-padded `YYYY-MM-DD`.

use std::collections::BTreeMap;

use super::paths::{tag_slug, tag_url};
use super::summary::PageSummary;

/// Default number of entries in the feed.
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// All posts carrying one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup {
    /// The tag as written in the first post that used it
    pub name: String,
    /// Path segment of the tag page
    pub slug: String,
    /// Posts with this tag, newest first
    pub posts: Vec<PageSummary>,
}

impl TagGroup {
    /// Site-relative URL of the tag page.
    pub fn url(&self) -> String {
        tag_url(&self.slug)
    }
}

/// The derived collections for one run.
#[derive(Debug, Clone, Default)]
pub struct SiteAggregate {
    /// Every summary, newest first
    pub index: Vec<PageSummary>,
    /// One group per tag page, sorted by tag name
    pub tags: Vec<TagGroup>,
    /// The most recent summaries, in index order
    pub feed: Vec<PageSummary>,
}

impl SiteAggregate {
    /// Fold the summaries (in input order) into the derived collections.
    pub fn from_summaries(summaries: Vec<PageSummary>, feed_limit: usize) -> Self {
        let index = sort_newest_first(summaries);
        let tags = group_by_tag(&index);
        let feed = index.iter().take(feed_limit).cloned().collect();

        Self { index, tags, feed }
    }
}

/// Sort by date descending. `sort_by` is stable, so equal dates keep their
/// input order.
fn sort_newest_first(mut summaries: Vec<PageSummary>) -> Vec<PageSummary> {
    summaries.sort_by(|a, b| b.date.cmp(&a.date));
    summaries
}

/// Group summaries (already in index order) by tag page.
///
/// Tags that map to the same path segment share a page, named after
/// the first spelling seen.
fn group_by_tag(index: &[PageSummary]) -> Vec<TagGroup> {
    let mut groups: BTreeMap<String, TagGroup> = BTreeMap::new();

    for summary in index {
        let mut seen_slugs: Vec<String> = Vec::new();
        for tag in &summary.tags {
            let slug = tag_slug(tag);
            if seen_slugs.contains(&slug) {
                continue;
            }
            seen_slugs.push(slug.clone());

            let group = groups.entry(slug.clone()).or_insert_with(|| TagGroup {
                name: tag.clone(),
                slug,
                posts: Vec::new(),
            });
            if group.name != *tag {
                tracing::warn!(
                    "tags '{}' and '{}' share the page {}",
                    group.name,
                    tag,
                    group.url()
                );
            }
            group.posts.push(summary.clone());
        }
    }

    let mut tags: Vec<TagGroup> = groups.into_values().collect();
    tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
    tags
}
