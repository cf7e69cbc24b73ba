//! Writers for JSON Lines and pretty JSON output files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors produced while writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory could not be created
    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("cannot write '{path}': {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Stale output could not be listed or removed
    #[error("cannot remove stale output '{path}': {source}")]
    Remove {
        /// File or directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No chapter id could be derived from a chapter file name
    #[error(
        "cannot derive a chapter id from '{path}'\n  Suggestion: name chapter files '<chapter_id>_papers.jsonl'"
    )]
    UnnamedChapter {
        /// Chapter file path
        path: PathBuf,
    },

    /// JSON serialization error (shouldn't occur for well-formed records).
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Creates `dir` and its parents if missing.
///
/// # Errors
/// Returns [`OutputError::CreateDir`] on failure.
pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes one compact JSON document per line, replacing any existing file.
///
/// Returns the number of lines written.
///
/// # Errors
/// Returns [`OutputError`] on I/O or serialization failure.
pub fn write_jsonl<'a, T, I>(path: &Path, records: I) -> Result<usize, OutputError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    let mut count = 0;

    for record in records {
        let line = serde_json::to_vec(record)?;
        writer.write_all(&line).map_err(write_error)?;
        writer.write_all(b"\n").map_err(write_error)?;
        count += 1;
    }
    writer.flush().map_err(write_error)?;

    debug!(path = %path.display(), lines = count, "Wrote JSONL file");
    Ok(count)
}

/// Writes `value` as two-space indented JSON, replacing any existing file.
///
/// # Errors
/// Returns [`OutputError`] on I/O or serialization failure.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, &json).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = json.len(), "Wrote JSON file");
    Ok(())
}
