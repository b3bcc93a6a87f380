//! Post template rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::PostContext;

/// Stage that applies the post template to rendered content.
///
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let context = PostContext::new(ctx.site.clone(), &doc.summary, doc.content.clone());
            doc.output_html = Some(ctx.renderer.render_post(&context)?);
        }

        Ok(())
    }
}
