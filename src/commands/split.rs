//! Split command: per-date chapter files.

use std::path::Path;

use anyhow::{Context, Result};
use survey_curator::{SplitSummary, Taxonomy, chapter_file_name, split_by_date};
use tracing::{info, warn};

use crate::app::config_runtime::Settings;
use crate::cli::SplitArgs;

pub(crate) fn run_split_command(
    args: &SplitArgs,
    settings: &Settings,
    taxonomy: &Taxonomy,
) -> Result<()> {
    let survey_dir = args.survey_dir.as_deref().unwrap_or(&settings.survey_dir);
    let output_dir = args.output_dir.as_deref().unwrap_or(&settings.split_dir);
    run_split(survey_dir, output_dir, taxonomy)?;
    Ok(())
}

/// Splits the chapter file of every taxonomy chapter found in `survey_dir`.
pub(crate) fn run_split(
    survey_dir: &Path,
    output_dir: &Path,
    taxonomy: &Taxonomy,
) -> Result<Vec<SplitSummary>> {
    let mut summaries = Vec::new();
    for chapter in taxonomy.chapters() {
        let chapter_file = survey_dir.join(chapter_file_name(&chapter.id));
        if !chapter_file.is_file() {
            warn!(file = %chapter_file.display(), "Chapter file not found, skipping");
            continue;
        }

        let summary = split_by_date(&chapter_file, output_dir).with_context(|| {
            format!("Failed to split '{}' by date", chapter_file.display())
        })?;
        if summary.missing_source > 0 || summary.rejected_tokens > 0 {
            warn!(
                chapter = %summary.chapter_id,
                missing_source = summary.missing_source,
                rejected_tokens = summary.rejected_tokens,
                "Some papers have no usable date"
            );
        }
        println!("{summary}");
        summaries.push(summary);
    }

    info!(
        chapters = summaries.len(),
        dir = %output_dir.display(),
        "Split complete"
    );
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_split_skips_missing_chapter_files() {
        let dir = TempDir::new().unwrap();
        let survey = dir.path().join("survey_data");
        fs::create_dir(&survey).unwrap();
        fs::write(
            survey.join("reward_model_rl_papers.jsonl"),
            "{\"title\": \"x\", \"source_file\": \"2024-05-01.jsonl\"}\n",
        )
        .unwrap();
        let out = dir.path().join("by_date");

        let summaries = run_split(&survey, &out, &Taxonomy::builtin()).unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].chapter_id, "reward_model_rl");
        assert!(out.join("reward_model_rl").join("2024-05-01.jsonl").is_file());
        assert!(!out.join("test_time_scaling").exists());
    }
}
