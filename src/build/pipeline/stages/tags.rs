//! Tag pages stage.

use crate::build::aggregate::SiteAggregate;
use crate::build::paths::{TAG_INDEX_STEM, root_prefix, tag_url};
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};
use crate::build::render::{TagContext, TagEntry, TagIndexContext};

/// Writes one page per tag and the tag index.
///
/// The tag index is written even when no post has tags, so the
/// navigation link always resolves.
pub struct TagsStage;

impl FinalizeStage for TagsStage {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn finalize(
        &self,
        aggregate: &SiteAggregate,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for group in &aggregate.tags {
            let html = ctx
                .renderer
                .render_tag(&TagContext::new(ctx.site.clone(), group))?;
            ctx.write_output(&group.url(), &html)?;
        }

        let tag_index_url = tag_url(TAG_INDEX_STEM);
        let context = TagIndexContext {
            site: ctx.site.clone(),
            root: root_prefix(&tag_index_url),
            tags: aggregate
                .tags
                .iter()
                .map(|group| TagEntry {
                    name: group.name.clone(),
                    url: format!("{}.html", group.slug),
                    count: group.posts.len(),
                })
                .collect(),
        };
        let html = ctx.renderer.render_tag_index(&context)?;
        ctx.write_output(&tag_index_url, &html)?;
        tracing::info!("wrote {} tag page(s)", aggregate.tags.len());

        Ok(())
    }
}
