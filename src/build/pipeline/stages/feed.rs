//! RSS feed stage.

use crate::build::aggregate::SiteAggregate;
use crate::build::feed::build_feed;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};

/// Writes the feed to the site's feed path. Does nothing when the feed
/// is disabled.
pub struct FeedStage;

impl FinalizeStage for FeedStage {
    fn name(&self) -> &'static str {
        "feed"
    }

    fn finalize(
        &self,
        aggregate: &SiteAggregate,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let site = ctx.site;
        let Some(feed_path) = site.feed_path.as_deref() else {
            tracing::debug!("feed disabled");
            return Ok(());
        };

        let xml = build_feed(site, aggregate);
        ctx.write_output(feed_path, &xml)?;
        tracing::info!("wrote feed {}", feed_path);

        Ok(())
    }
}
