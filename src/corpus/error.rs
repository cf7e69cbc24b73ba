//! Error types for corpus discovery and reading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while listing or reading corpus files.
///
/// The tolerant loaders in this module recover from these; they surface only
/// through the strict variants.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Corpus directory could not be listed
    #[error("cannot list corpus directory '{path}': {source}")]
    ListDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A corpus file could not be opened or read
    #[error("cannot read '{path}': {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::ListDir { path, .. } | Self::Read { path, .. } => path,
        }
    }
}
