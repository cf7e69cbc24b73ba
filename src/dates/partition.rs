//! Splitting a chapter file into one file per date.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{DATE_FILE_SUFFIX, DATE_INDEX_FILE, DateIndex, chapter_id_from_path, is_safe_token, paper_date};
use crate::corpus::load_records;
use crate::output::{OutputError, ensure_dir, write_json_pretty, write_jsonl};
use crate::paper::Paper;

/// What a split produced for one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// Chapter id derived from the chapter file name
    pub chapter_id: String,
    /// Directory holding the date files and the index
    pub chapter_dir: PathBuf,
    /// Index written to `dates_index.json`
    pub index: DateIndex,
    /// Unparseable lines in the chapter file
    pub skipped_lines: usize,
    /// Records without a `source_file`
    pub missing_source: usize,
    /// Records whose date token is not a usable file name
    pub rejected_tokens: usize,
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} dates, {} papers",
            self.chapter_id,
            self.index.len(),
            self.index.total
        )
    }
}

/// Writes `<output_dir>/<chapter_id>/<date>.jsonl` for every date token in
/// `chapter_file`, plus `dates_index.json`.
///
/// Records keep their input order within a date file. Records without a
/// `source_file` are dropped, as are records whose date token could escape
/// the chapter directory. Date files left from an earlier split whose date
/// no longer occurs are removed. A missing chapter file yields an empty
/// index.
///
/// # Errors
/// Returns [`OutputError::UnnamedChapter`] if no chapter id can be derived
/// from the file name, or another [`OutputError`] if writing fails.
#[instrument(skip_all, fields(chapter_file = %chapter_file.display()))]
pub fn split_by_date(chapter_file: &Path, output_dir: &Path) -> Result<SplitSummary, OutputError> {
    let chapter_id =
        chapter_id_from_path(chapter_file).ok_or_else(|| OutputError::UnnamedChapter {
            path: chapter_file.to_path_buf(),
        })?;

    let outcome = load_records(chapter_file);
    let mut groups: BTreeMap<String, Vec<Paper>> = BTreeMap::new();
    let mut missing_source = 0;
    let mut rejected_tokens = 0;

    for paper in outcome.records {
        let Some(date) = paper_date(&paper) else {
            missing_source += 1;
            continue;
        };
        if !is_safe_token(date) {
            warn!(date, "Dropping record with unusable date token");
            rejected_tokens += 1;
            continue;
        }
        let date = date.to_string();
        groups.entry(date).or_default().push(paper);
    }

    let chapter_dir = output_dir.join(&chapter_id);
    ensure_dir(&chapter_dir)?;
    remove_stale_date_files(&chapter_dir, &groups)?;

    let mut counts = BTreeMap::new();
    for (date, papers) in &groups {
        let path = chapter_dir.join(format!("{date}{DATE_FILE_SUFFIX}"));
        let written = write_jsonl(&path, papers)?;
        counts.insert(date.clone(), written);
    }

    let index = DateIndex::from_counts(counts);
    write_json_pretty(&chapter_dir.join(DATE_INDEX_FILE), &index)?;

    info!(
        chapter = %chapter_id,
        dates = index.len(),
        papers = index.total,
        skipped = outcome.skipped.len(),
        missing_source,
        "Split chapter by date"
    );

    Ok(SplitSummary {
        chapter_id,
        chapter_dir,
        index,
        skipped_lines: outcome.skipped.len(),
        missing_source,
        rejected_tokens,
    })
}

/// Deletes `<date>.jsonl` files in `chapter_dir` whose date is not in `keep`.
fn remove_stale_date_files<V>(
    chapter_dir: &Path,
    keep: &BTreeMap<String, V>,
) -> Result<usize, OutputError> {
    let remove_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| OutputError::Remove { path, source }
    };

    let mut removed = 0;
    for entry in fs::read_dir(chapter_dir).map_err(remove_error(chapter_dir))? {
        let path = entry.map_err(remove_error(chapter_dir))?.path();
        let Some(date) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(DATE_FILE_SUFFIX))
        else {
            continue;
        };
        if keep.contains_key(date) || !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(remove_error(&path))?;
        debug!(date, "Removed stale date file");
        removed += 1;
    }
    Ok(removed)
}
