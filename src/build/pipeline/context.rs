//! Pipeline context for sharing state across stages.

use std::path::{Path, PathBuf};

use crate::build::paths::url_to_output_path;
use crate::build::pipeline::PipelineError;
use crate::build::render::{Renderer, SiteContext};

/// Shared context for pipeline stages.
///
/// Contains all resources and configuration needed by stages during processing.
pub struct PipelineContext<'a> {
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// Site metadata passed to every template
    pub site: &'a SiteContext,

    /// Template renderer
    pub renderer: &'a Renderer,

    /// Number of posts in the feed
    pub feed_limit: usize,

    /// Every file written so far, in write order
    pub written: Vec<PathBuf>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        output_dir: &'a Path,
        site: &'a SiteContext,
        renderer: &'a Renderer,
        feed_limit: usize,
    ) -> Self {
        Self {
            output_dir,
            site,
            renderer,
            feed_limit,
            written: Vec::new(),
        }
    }

    /// Write an output file at a site-relative URL, creating parent
    /// directories as needed. Each path may be written once per build.
    pub fn write_output(&mut self, url: &str, contents: &str) -> Result<PathBuf, PipelineError> {
        let output_path = url_to_output_path(url, self.output_dir);
        if self.written.contains(&output_path) {
            return Err(PipelineError::Overwrite { path: output_path });
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&output_path, contents).map_err(|source| PipelineError::Write {
            path: output_path.clone(),
            source,
        })?;

        self.written.push(output_path.clone());
        Ok(output_path)
    }
}
