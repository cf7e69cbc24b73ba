//! Analyze command: date distribution report per chapter.

use std::path::Path;

use anyhow::Result;
use survey_curator::{DistributionReport, Taxonomy, analyze_dates, chapter_file_name};
use tracing::{debug, warn};

use crate::app::config_runtime::Settings;
use crate::cli::AnalyzeArgs;

pub(crate) fn run_analyze_command(
    args: &AnalyzeArgs,
    settings: &Settings,
    taxonomy: &Taxonomy,
) -> Result<()> {
    let survey_dir = args.survey_dir.as_deref().unwrap_or(&settings.survey_dir);
    for (chapter_id, report) in run_analysis(survey_dir, usize::from(args.top), taxonomy) {
        println!("\n=== {} ===", chapter_id.to_uppercase());
        print!("{report}");
    }
    Ok(())
}

/// Computes the report for every taxonomy chapter file found in `survey_dir`.
pub(crate) fn run_analysis(
    survey_dir: &Path,
    limit: usize,
    taxonomy: &Taxonomy,
) -> Vec<(String, DistributionReport)> {
    let mut reports = Vec::new();
    for chapter in taxonomy.chapters() {
        let chapter_file = survey_dir.join(chapter_file_name(&chapter.id));
        if !chapter_file.is_file() {
            warn!(file = %chapter_file.display(), "Chapter file not found, skipping");
            continue;
        }

        let counts = analyze_dates(&chapter_file);
        if counts.skipped_lines > 0 || counts.missing_source > 0 || counts.rejected_tokens > 0 {
            debug!(
                chapter = %chapter.id,
                skipped_lines = counts.skipped_lines,
                missing_source = counts.missing_source,
                rejected_tokens = counts.rejected_tokens,
                "Ignored records without a date"
            );
        }
        reports.push((chapter.id.clone(), counts.report(limit)));
    }
    reports
}
