use std::path::{Path, PathBuf};

use super::document::Document;

/// Extension of input documents.
const DOCUMENT_EXTENSION: &str = "md";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("posts directory does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("posts path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read document {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Posts source
// =============================================================================

/// The directory posts are read from, after validation.
#[derive(Debug, Clone)]
pub struct PostsSource {
    pub local_path: PathBuf,
}

impl PostsSource {
    /// Validate that the posts directory exists.
    pub fn resolve(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(SourceError::NotADirectory(path.to_path_buf()));
        }
        Ok(Self {
            local_path: path.to_path_buf(),
        })
    }

    /// List the markdown files directly inside the directory, sorted by
    /// file name so every run sees the same input order.
    pub fn discover(&self) -> Result<Vec<PathBuf>, SourceError> {
        let entries = std::fs::read_dir(&self.local_path).map_err(|source| SourceError::ReadDir {
            path: self.local_path.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::ReadEntry {
                path: self.local_path.clone(),
                source,
            })?;
            let path = entry.path();
            let is_document = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == DOCUMENT_EXTENSION);
            if is_document {
                files.push(path);
            } else {
                tracing::debug!("skipping {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read and split every document in the directory.
    pub fn load_documents(&self) -> Result<Vec<Document>, SourceError> {
        self.discover()?
            .into_iter()
            .map(|path| {
                let raw = std::fs::read_to_string(&path).map_err(|source| {
                    SourceError::ReadFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                let relative = path
                    .strip_prefix(&self.local_path)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone());
                Ok(Document::parse(relative, &raw))
            })
            .collect()
    }
}
