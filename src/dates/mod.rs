//! Date bucketing of chapter files.
//!
//! Every classified paper records the corpus file it came from; with corpus
//! files named by date (`2024-05-01.jsonl`) that name doubles as the date the
//! paper was collected. This module derives the date token, splits chapter
//! files into per-date files ([`split_by_date`]) and profiles how papers are
//! spread over dates ([`analyze_dates`]).

mod distribution;
mod partition;

pub use distribution::{
    DEFAULT_REPORT_LIMIT, DateCounts, DistributionReport, analyze_dates,
};
pub use partition::{SplitSummary, split_by_date};

use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::extract::CHAPTER_FILE_SUFFIX;
use crate::paper::Paper;

/// Suffix stripped from `source_file` to obtain the date token.
pub const DATE_FILE_SUFFIX: &str = ".jsonl";
/// Name of the per-chapter index written next to the date files.
pub const DATE_INDEX_FILE: &str = "dates_index.json";

/// Derives the date token from a recorded source file name.
///
/// `"2024-05-01.jsonl"` becomes `"2024-05-01"`; a name without the suffix is
/// used as is. The token is a grouping key only and is never parsed as a date.
#[must_use]
pub fn date_token(source_file: &str) -> &str {
    source_file
        .strip_suffix(DATE_FILE_SUFFIX)
        .unwrap_or(source_file)
}

/// Date token of a paper, `None` when it has no `source_file`.
#[must_use]
pub fn paper_date(paper: &Paper) -> Option<&str> {
    paper.source_file().map(date_token)
}

/// Chapter id encoded in a chapter file name.
///
/// `survey_data/reward_model_rl_papers.jsonl` yields `reward_model_rl`; a file
/// without the `_papers.jsonl` suffix falls back to its stem.
#[must_use]
pub fn chapter_id_from_path(chapter_file: &Path) -> Option<String> {
    let name = chapter_file.file_name()?.to_str()?;
    let id = name
        .strip_suffix(CHAPTER_FILE_SUFFIX)
        .or_else(|| name.strip_suffix(DATE_FILE_SUFFIX))
        .unwrap_or(name);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Returns true if `token` can be used as a single file name component.
#[must_use]
pub fn is_safe_token(token: &str) -> bool {
    if token.is_empty() || token.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(token).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Contents of `dates_index.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateIndex {
    /// Date tokens, latest first
    pub dates: Vec<String>,
    /// Papers per date token
    pub counts: BTreeMap<String, usize>,
    /// Sum of all counts
    pub total: usize,
}

impl DateIndex {
    /// Builds an index from per-date counts.
    #[must_use]
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        let dates = counts.keys().rev().cloned().collect();
        let total = counts.values().sum();
        Self {
            dates,
            counts,
            total,
        }
    }

    /// Number of distinct dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no dates were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
