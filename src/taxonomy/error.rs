//! Error types for taxonomy loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a keyword taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Taxonomy file could not be read
    #[error("cannot read taxonomy file '{path}': {source}\n  Suggestion: check the --taxonomy path")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Taxonomy file is not valid JSON or has the wrong shape
    #[error("invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// No chapters were defined
    #[error("taxonomy defines no chapters")]
    Empty,

    /// A chapter id is blank
    #[error("chapter #{index} has an empty id")]
    EmptyId {
        /// Zero-based position of the chapter
        index: usize,
    },

    /// A chapter id cannot be used as a single file name
    #[error("chapter id '{id}' is not a plain file name\n  Suggestion: use letters, digits, '_' or '-' without path separators or surrounding spaces")]
    UnsafeId {
        /// The rejected id
        id: String,
    },

    /// Two chapters share an id
    #[error("duplicate chapter id '{id}'")]
    DuplicateChapter {
        /// The repeated id
        id: String,
    },

    /// A chapter has no keywords and could never match
    #[error("chapter '{chapter}' has no keywords")]
    NoKeywords {
        /// Chapter id
        chapter: String,
    },

    /// A keyword is blank
    #[error("chapter '{chapter}' contains an empty keyword")]
    EmptyKeyword {
        /// Chapter id
        chapter: String,
    },

    /// A keyword appears twice in one chapter (case-insensitive)
    #[error("chapter '{chapter}' lists keyword '{keyword}' more than once")]
    DuplicateKeyword {
        /// Chapter id
        chapter: String,
        /// The repeated keyword, as written the second time
        keyword: String,
    },

    /// A keyword pattern failed to compile
    #[error("keyword '{keyword}' in chapter '{chapter}' cannot be compiled: {source}")]
    Pattern {
        /// Chapter id
        chapter: String,
        /// Offending keyword
        keyword: String,
        /// Regex build error
        #[source]
        source: regex::Error,
    },
}
