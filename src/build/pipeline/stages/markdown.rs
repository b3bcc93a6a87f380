//! Markup conversion stage.

use crate::build::markdown::to_html;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that converts each document body to an HTML fragment.
///
/// After this stage, `doc.content` contains HTML.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        _ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            doc.content = to_html(&doc.content);
        }

        Ok(())
    }
}
