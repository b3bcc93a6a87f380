//! Strict date checking stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::summary::parse_date;

/// Stage that fails the run when a document has no valid `date` field.
///
/// Without it, a missing date falls back to the build date.
pub struct DateStage;

impl Stage for DateStage {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        _ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for doc in docs.iter() {
            let path = doc.doc.source_path.display();
            match doc.doc.front_matter.date() {
                None => {
                    return Err(PipelineError::stage(
                        "dates",
                        format!("{path} has no date"),
                    ));
                }
                Some(date) if parse_date(date).is_none() => {
                    return Err(PipelineError::stage(
                        "dates",
                        format!("{path} has date '{date}', expected YYYY-MM-DD"),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
