//! Build pipeline for document processing.
//!
//! The pipeline transforms documents through a series of stages:
//! 1. Markdown conversion (body to HTML fragment)
//! 2. Template rendering (post template wrapper)
//! 3. File writing (output to disk)
//!
//! Once every document has been through the stages, the summaries are
//! folded into a [`SiteAggregate`] and the finalize stages write the
//! pages derived from it: the index, tag pages and the feed.
//!
//! Custom stages can be inserted before any named stage.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::PipelineError;

use stages::{FeedStage, IndexStage, MarkdownStage, TagsStage, TemplateStage, WriteStage};

pub use stages::DateStage;

use crate::build::aggregate::SiteAggregate;

/// A stage in the document processing pipeline.
///
/// Stages transform documents sequentially. Each stage receives all documents
/// and can modify them in place before passing to the next stage.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used for insertion points).
    fn name(&self) -> &'static str;

    /// Process documents through this stage.
    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// A stage that runs once after all documents are processed.
///
/// Finalize stages only see the aggregate, never individual documents,
/// so nothing they write depends on the order documents were processed in.
pub trait FinalizeStage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Run finalization after all documents are processed and written.
    fn finalize(
        &self,
        aggregate: &SiteAggregate,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The document processing pipeline.
///
/// The default pipeline includes: markdown → template → write, then the
/// index, tags and feed finalize stages.
///
/// # Extension Points
///
/// Insert custom stages using `insert_before`:
///
/// ```ignore
/// pipeline.insert_before("markdown", DateStage);
/// ```
pub struct Pipeline {
    /// Document processing stages (run for each document batch)
    stages: Vec<Box<dyn Stage>>,
    /// Build-wide stages (run once after all documents)
    finalize_stages: Vec<Box<dyn FinalizeStage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    fn new() -> Self {
        Self {
            stages: Vec::new(),
            finalize_stages: Vec::new(),
        }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline.add_finalize_stage(IndexStage);
        pipeline.add_finalize_stage(TagsStage);
        pipeline.add_finalize_stage(FeedStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Insert a stage before the named stage.
    ///
    /// # Panics
    ///
    /// Panics if no stage with the given name exists.
    pub fn insert_before<S: Stage + 'static>(&mut self, name: &str, stage: S) -> &mut Self {
        let pos = self
            .stages
            .iter()
            .position(|s| s.name() == name)
            .unwrap_or_else(|| panic!("stage '{}' not found in pipeline", name));
        self.stages.insert(pos, Box::new(stage));
        self
    }

    /// Add a finalize stage (runs after all documents are processed).
    pub fn add_finalize_stage<S: FinalizeStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.finalize_stages.push(Box::new(stage));
        self
    }

    /// Run the pipeline on a set of documents.
    ///
    /// Returns the aggregate the finalize stages were given.
    pub fn run(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &mut PipelineContext,
    ) -> Result<SiteAggregate, PipelineError> {
        for stage in &self.stages {
            tracing::debug!("running stage {}", stage.name());
            stage.process(docs, ctx)?;
        }

        // Nothing aggregated is visible until every document is done
        let summaries = docs.iter().map(|d| d.summary.clone()).collect();
        let aggregate = SiteAggregate::from_summaries(summaries, ctx.feed_limit);

        for stage in &self.finalize_stages {
            tracing::debug!("running finalize stage {}", stage.name());
            stage.finalize(&aggregate, ctx)?;
        }

        Ok(aggregate)
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}
