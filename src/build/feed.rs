//! RSS feed generation.
//!
//! Turns the feed selection of a [`SiteAggregate`] into an RSS 2.0 document.

use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};

use super::aggregate::SiteAggregate;
use super::render::SiteContext;
use super::summary::PageSummary;

/// Build the feed XML for the aggregate's most recent posts.
///
/// Entries whose date isn't a valid `YYYY-MM-DD` are left out; one bad
/// date never drops the whole feed.
pub fn build_feed(site: &SiteContext, aggregate: &SiteAggregate) -> String {
    let items: Vec<rss::Item> = aggregate
        .feed
        .iter()
        .filter_map(|summary| {
            let item = summary_to_item(summary, site.url.as_deref());
            if item.is_none() {
                tracing::warn!(
                    "skipping {} in feed: date '{}' is not YYYY-MM-DD",
                    summary.url,
                    summary.date
                );
            }
            item
        })
        .collect();

    let channel = ChannelBuilder::default()
        .title(&site.title)
        .link(absolute_url(site.url.as_deref(), "index.html"))
        .description(site.description.clone())
        .language(Some(site.language.clone()))
        .generator(Some(format!("quire {}", env!("CARGO_PKG_VERSION"))))
        .items(items)
        .build();

    channel.to_string()
}

/// Convert a summary to a feed item.
/// Returns None if the date doesn't parse.
fn summary_to_item(summary: &PageSummary, base_url: Option<&str>) -> Option<rss::Item> {
    let published = summary.parsed_date()?.and_hms_opt(0, 0, 0)?.and_utc();
    let link = absolute_url(base_url, &summary.url);

    Some(
        ItemBuilder::default()
            .title(Some(summary.title.clone()))
            .link(Some(link.clone()))
            .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
            .description(Some(summary.excerpt.clone()))
            .pub_date(Some(published.to_rfc2822()))
            .build(),
    )
}

/// Join a site-relative URL onto the configured base URL, if any.
fn absolute_url(base_url: Option<&str>, url: &str) -> String {
    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/')),
        None => url.to_string(),
    }
}
