//! Extract command: classify the corpus into chapter files.

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use survey_curator::extract::{ALL_PAPERS_FILE, STATS_FILE};
use survey_curator::{
    Classifier, Extraction, ExtractionStats, Taxonomy, chapter_file_name, discover_corpus_files,
    persist,
};
use tracing::{info, warn};

use crate::app::config_runtime::Settings;
use crate::app::terminal;
use crate::cli::ExtractArgs;

/// Keywords listed per chapter in the printed summary.
const SUMMARY_KEYWORDS: usize = 5;

/// Message printed when no paper matched any chapter.
pub(crate) const NO_PAPERS_MESSAGE: &str =
    "No relevant papers found. Check the corpus directory and the taxonomy keywords.";

/// Paths and options of one extraction run.
pub(crate) struct ExtractPlan<'a> {
    pub(crate) corpus_dir: &'a Path,
    pub(crate) output_dir: &'a Path,
    pub(crate) exclude_marker: &'a str,
    pub(crate) quiet: bool,
}

pub(crate) fn run_extract_command(
    args: &ExtractArgs,
    settings: &Settings,
    taxonomy: &Taxonomy,
) -> Result<()> {
    let corpus_dir = args.corpus_dir.as_deref().unwrap_or(&settings.corpus_dir);
    let output_dir = args.output_dir.as_deref().unwrap_or(&settings.survey_dir);
    let exclude_marker = args
        .exclude_marker
        .as_deref()
        .unwrap_or(&settings.exclude_marker);

    let plan = ExtractPlan {
        corpus_dir,
        output_dir,
        exclude_marker,
        quiet: settings.quiet,
    };
    run_extraction(&plan, taxonomy)?;
    Ok(())
}

/// Runs extraction and prints its summary.
///
/// Returns `None` when no paper matched; nothing is written in that case.
pub(crate) fn run_extraction(
    plan: &ExtractPlan<'_>,
    taxonomy: &Taxonomy,
) -> Result<Option<ExtractionStats>> {
    let classifier = Classifier::new(taxonomy).context("Failed to compile taxonomy keywords")?;
    let files = discover_corpus_files(plan.corpus_dir, plan.exclude_marker).with_context(|| {
        format!(
            "Failed to list corpus directory '{}'",
            plan.corpus_dir.display()
        )
    })?;
    info!(
        files = files.len(),
        dir = %plan.corpus_dir.display(),
        "Extracting survey papers"
    );

    let use_progress_bar = terminal::should_use_progress_bar(
        io::stderr().is_terminal(),
        plan.quiet,
        terminal::is_dumb_terminal(),
    );
    let progress = if use_progress_bar {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let mut extraction = Extraction::new(&classifier);
    for path in &files {
        if let Some(bar) = &progress {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            bar.set_message(name);
        }
        extraction.ingest_file(&classifier, path);
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    if extraction.skipped_lines() > 0 || extraction.unreadable_files() > 0 {
        warn!(
            skipped_lines = extraction.skipped_lines(),
            unreadable_files = extraction.unreadable_files(),
            "Some corpus input was ignored"
        );
    }

    if extraction.is_empty() {
        println!("{NO_PAPERS_MESSAGE}");
        return Ok(None);
    }

    let stats = persist(&extraction, plan.output_dir).with_context(|| {
        format!(
            "Failed to save extracted papers to '{}'",
            plan.output_dir.display()
        )
    })?;

    let chapter_order: Vec<&str> = extraction
        .chapters()
        .iter()
        .map(|chapter| chapter.id.as_str())
        .collect();
    for line in summary_lines(&stats, &chapter_order, plan.output_dir) {
        println!("{line}");
    }
    Ok(Some(stats))
}

/// Builds the printed extraction summary, chapters in taxonomy order.
pub(crate) fn summary_lines(
    stats: &ExtractionStats,
    chapter_order: &[&str],
    output_dir: &Path,
) -> Vec<String> {
    let mut lines = vec![
        "Paper Extraction Statistics".to_string(),
        format!("Total papers: {}", stats.total_papers),
    ];

    for id in chapter_order {
        let Some(chapter) = stats.chapter_stats.get(*id) else {
            continue;
        };
        lines.push(String::new());
        lines.push(chapter.name.clone());
        lines.push(format!("  Papers: {}", chapter.count));
        if !chapter.top_keywords.is_empty() {
            lines.push("  Top keywords:".to_string());
            for (keyword, count) in chapter.top_keywords.iter().take(SUMMARY_KEYWORDS) {
                lines.push(format!("    - {keyword}: {count}"));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!("Saved to {}:", output_dir.display()));
    lines.push(format!("  - {ALL_PAPERS_FILE}"));
    for id in chapter_order {
        lines.push(format!("  - {}", chapter_file_name(id)));
    }
    lines.push(format!("  - {STATS_FILE}"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use survey_curator::extract::ChapterStats;
    use survey_curator::Chapter;
    use tempfile::TempDir;

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            Chapter {
                id: "a".to_string(),
                name: "Alpha".to_string(),
                keywords: vec!["foo".to_string()],
            },
            Chapter {
                id: "b".to_string(),
                name: "Beta".to_string(),
                keywords: vec!["bar".to_string()],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_lines_follow_taxonomy_order_and_limit_keywords() {
        let mut chapter_stats = BTreeMap::new();
        chapter_stats.insert(
            "b".to_string(),
            ChapterStats {
                name: "Beta".to_string(),
                count: 1,
                top_keywords: vec![("bar".to_string(), 1)],
            },
        );
        chapter_stats.insert(
            "a".to_string(),
            ChapterStats {
                name: "Alpha".to_string(),
                count: 7,
                top_keywords: (1..=7).map(|n| (format!("k{n}"), 8 - n)).collect(),
            },
        );
        let stats = ExtractionStats {
            total_papers: 8,
            chapter_stats,
        };

        let lines = summary_lines(&stats, &["b", "a"], Path::new("out"));

        let beta = lines.iter().position(|line| line == "Beta").unwrap();
        let alpha = lines.iter().position(|line| line == "Alpha").unwrap();
        assert!(beta < alpha);
        assert!(lines.contains(&"    - k5: 3".to_string()));
        assert!(!lines.iter().any(|line| line.contains("k6")));
        assert!(lines.contains(&"  - b_papers.jsonl".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("  - extraction_stats.json"));
    }

    #[test]
    fn test_run_extraction_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("data");
        fs::create_dir(&corpus).unwrap();
        fs::write(
            corpus.join("2024-05-01.jsonl"),
            "{\"title\": \"foo study\", \"summary\": \"\"}\n{\"title\": \"nothing\", \"summary\": \"\"}\n",
        )
        .unwrap();
        let output = dir.path().join("survey_data");

        let stats = run_extraction(
            &ExtractPlan {
                corpus_dir: &corpus,
                output_dir: &output,
                exclude_marker: "_AI_enhanced_",
                quiet: true,
            },
            &taxonomy(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(stats.total_papers, 1);
        assert!(output.join("a_papers.jsonl").is_file());
        assert!(output.join("b_papers.jsonl").is_file());
        assert!(output.join(STATS_FILE).is_file());
    }

    #[test]
    fn test_run_extraction_without_matches_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("data");
        fs::create_dir(&corpus).unwrap();
        fs::write(corpus.join("2024-05-01.jsonl"), "{\"title\": \"nothing\"}\n").unwrap();
        let output = dir.path().join("survey_data");

        let stats = run_extraction(
            &ExtractPlan {
                corpus_dir: &corpus,
                output_dir: &output,
                exclude_marker: "",
                quiet: true,
            },
            &taxonomy(),
        )
        .unwrap();

        assert!(stats.is_none());
        assert!(!output.exists());
    }
}
