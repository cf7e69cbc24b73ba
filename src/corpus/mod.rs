//! Newline-delimited JSON corpus reading.
//!
//! Every non-blank line of a corpus file is one paper record. Lines that do
//! not parse are reported as [`SkippedLine`]s rather than aborting the load,
//! and a file that cannot be read at all is treated as empty by
//! [`load_records`].

mod error;

pub use error::CorpusError;

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, error, instrument, warn};

use crate::paper::Paper;

/// File extension of corpus and chapter files.
pub const CORPUS_EXTENSION: &str = "jsonl";

/// Result of interpreting a single corpus line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Line held a JSON object
    Record(Paper),
    /// Line was empty or whitespace
    Blank,
    /// Line could not be used; carries the reason
    Skip(String),
}

/// Parses one corpus line.
#[must_use]
pub fn parse_line(line: &str) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match Paper::from_value(value) {
            Some(paper) => LineOutcome::Record(paper),
            None => LineOutcome::Skip("expected a JSON object".to_string()),
        },
        Err(e) => LineOutcome::Skip(e.to_string()),
    }
}

/// A corpus line that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number in the file
    pub line_number: usize,
    /// Why the line was rejected
    pub reason: String,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.reason)
    }
}

/// Records loaded from one file plus everything that was skipped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully parsed records, in file order
    pub records: Vec<Paper>,
    /// Lines that failed to parse
    pub skipped: Vec<SkippedLine>,
    /// True when the file itself could not be read
    pub unreadable: bool,
}

impl LoadOutcome {
    /// Creates an empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no records were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Count of skipped lines.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} records ({} skipped)",
            self.records.len(),
            self.skipped.len()
        )
    }
}

/// Reads every record from `path`, failing only on file-level I/O errors.
///
/// Malformed lines, non-object lines and invalid UTF-8 are collected in
/// [`LoadOutcome::skipped`].
///
/// # Errors
/// Returns [`CorpusError::Read`] if the file cannot be opened or a read fails.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_records(path: &Path) -> Result<LoadOutcome, CorpusError> {
    let read_error = |source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    let mut outcome = LoadOutcome::new();
    read_lines_into(BufReader::new(file), &mut outcome).map_err(read_error)?;
    Ok(outcome)
}

/// Parses lines from `reader` into `outcome` until end of input.
///
/// Records and skips gathered before a read error stay in `outcome`.
fn read_lines_into<R: BufRead>(mut reader: R, outcome: &mut LoadOutcome) -> io::Result<()> {
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let reason = match std::str::from_utf8(&buffer) {
            Ok(line) => match parse_line(line) {
                LineOutcome::Record(paper) => {
                    outcome.records.push(paper);
                    continue;
                }
                LineOutcome::Blank => continue,
                LineOutcome::Skip(reason) => reason,
            },
            Err(e) => format!("invalid UTF-8: {e}"),
        };
        warn!(line = line_number, %reason, "Skipping unparseable line");
        outcome.skipped.push(SkippedLine {
            line_number,
            reason,
        });
    }

    debug!(
        records = outcome.records.len(),
        skipped = outcome.skipped.len(),
        "Read corpus file"
    );
    Ok(())
}

/// Reads every record from `path`, treating an unreadable file as empty.
///
/// The failure is logged and flagged via [`LoadOutcome::unreadable`]; it is
/// never propagated. Records read before a failure part-way through the file
/// are kept.
#[must_use]
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_records(path: &Path) -> LoadOutcome {
    let mut outcome = LoadOutcome::new();
    let result = File::open(path)
        .and_then(|file| read_lines_into(BufReader::new(file), &mut outcome));
    if let Err(source) = result {
        let e = CorpusError::Read {
            path: path.to_path_buf(),
            source,
        };
        error!(
            error = %e,
            kept = outcome.records.len(),
            "Cannot read whole file, keeping records read so far"
        );
        outcome.unreadable = true;
    }
    outcome
}

/// Lists the `.jsonl` files directly inside `dir`, sorted by path.
///
/// Hidden files and files whose name contains `exclude_marker` are left out
/// (an empty marker excludes nothing). A missing directory yields an empty
/// list.
///
/// # Errors
/// Returns [`CorpusError::ListDir`] if the directory exists but cannot be read.
#[instrument]
pub fn discover_corpus_files(dir: &Path, exclude_marker: &str) -> Result<Vec<PathBuf>, CorpusError> {
    let list_error = |source| CorpusError::ListDir {
        path: dir.to_path_buf(),
        source,
    };
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "Corpus directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(list_error(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(list_error)?.path();
        if !path.is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(CORPUS_EXTENSION)
        {
            continue;
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if name.starts_with('.') {
            continue;
        }
        if !exclude_marker.is_empty() && name.contains(exclude_marker) {
            debug!(file = %name, "Excluding marked corpus file");
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
