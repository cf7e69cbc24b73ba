//! Per-date distribution of a chapter file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, instrument, warn};

use super::{is_safe_token, paper_date};
use crate::corpus::load_records;

/// Default number of dates listed in each section of a report.
pub const DEFAULT_REPORT_LIMIT: usize = 10;

/// Papers per date token for one chapter file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateCounts {
    /// Count per date token
    pub counts: BTreeMap<String, usize>,
    /// Unparseable lines in the chapter file
    pub skipped_lines: usize,
    /// Records without a `source_file`
    pub missing_source: usize,
    /// Records whose date token is not a usable file name
    pub rejected_tokens: usize,
}

impl DateCounts {
    /// Sum of all per-date counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Builds the summary report for these counts.
    #[must_use]
    pub fn report(&self, limit: usize) -> DistributionReport {
        DistributionReport::from_counts(&self.counts, limit)
    }
}

/// Counts the records of `chapter_file` per date token.
///
/// Parsing and token filtering match [`split_by_date`](super::split_by_date),
/// so the counts agree with the chapter's `dates_index.json`. A missing file
/// counts as empty.
#[instrument(skip_all, fields(chapter_file = %chapter_file.display()))]
pub fn analyze_dates(chapter_file: &Path) -> DateCounts {
    let outcome = load_records(chapter_file);
    let mut result = DateCounts {
        skipped_lines: outcome.skipped.len(),
        ..DateCounts::default()
    };

    for paper in &outcome.records {
        match paper_date(paper) {
            Some(date) if is_safe_token(date) => {
                *result.counts.entry(date.to_string()).or_insert(0) += 1;
            }
            Some(date) => {
                warn!(date, "Ignoring record with unusable date token");
                result.rejected_tokens += 1;
            }
            None => result.missing_source += 1,
        }
    }

    debug!(
        dates = result.counts.len(),
        papers = result.total(),
        missing_source = result.missing_source,
        rejected_tokens = result.rejected_tokens,
        "Counted papers per date"
    );
    result
}

/// Summary statistics of a date distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    /// Number of distinct dates
    pub total_dates: usize,
    /// Number of dated papers
    pub total_papers: usize,
    /// Papers per date; `None` when there are no dates
    pub average_per_date: Option<f64>,
    /// Most recent dates in ascending order
    pub latest: Vec<(String, usize)>,
    /// Dates with the most papers, busiest first
    pub busiest: Vec<(String, usize)>,
}

impl DistributionReport {
    /// Computes the report, listing at most `limit` dates per section.
    ///
    /// Busiest dates with equal counts are ordered latest first.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(counts: &BTreeMap<String, usize>, limit: usize) -> Self {
        let total_dates = counts.len();
        let total_papers: usize = counts.values().sum();
        let average_per_date =
            (total_dates > 0).then(|| total_papers as f64 / total_dates as f64);

        let latest = counts
            .iter()
            .skip(total_dates.saturating_sub(limit))
            .map(|(date, &count)| (date.clone(), count))
            .collect();

        let mut by_count: Vec<(&String, usize)> =
            counts.iter().rev().map(|(date, &count)| (date, count)).collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1));
        let busiest = by_count
            .into_iter()
            .take(limit)
            .map(|(date, count)| (date.clone(), count))
            .collect();

        Self {
            total_dates,
            total_papers,
            average_per_date,
            latest,
            busiest,
        }
    }
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total dates: {}", self.total_dates)?;
        writeln!(f, "Total papers: {}", self.total_papers)?;
        match self.average_per_date {
            Some(average) => writeln!(f, "Average per date: {average:.1}")?,
            None => writeln!(f, "Average per date: n/a")?,
        }

        writeln!(f, "\nLatest {} dates:", self.latest.len())?;
        for (date, count) in &self.latest {
            writeln!(f, "  {date}: {count} papers")?;
        }

        writeln!(f, "\nBusiest {} dates:", self.busiest.len())?;
        for (date, count) in &self.busiest {
            writeln!(f, "  {date}: {count} papers")?;
        }
        Ok(())
    }
}
