//! Home page stage.

use crate::build::aggregate::SiteAggregate;
use crate::build::paths::root_prefix;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};
use crate::build::render::IndexContext;
use crate::build::search::build_search_index;

const INDEX_URL: &str = "index.html";

/// Writes `index.html`: every post newest first, with the search index
/// embedded as JSON.
pub struct IndexStage;

impl FinalizeStage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn finalize(
        &self,
        aggregate: &SiteAggregate,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let context = IndexContext {
            site: ctx.site.clone(),
            root: root_prefix(INDEX_URL),
            posts: aggregate.index.clone(),
            search_index: build_search_index(&aggregate.index)?,
        };
        let html = ctx.renderer.render_index(&context)?;
        ctx.write_output(INDEX_URL, &html)?;
        tracing::info!("wrote index of {} post(s)", aggregate.index.len());

        Ok(())
    }
}
