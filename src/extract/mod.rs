//! Corpus-wide chapter extraction.
//!
//! Reads every corpus file, classifies each paper, and keeps the papers that
//! land in at least one chapter. [`persist`] then writes the combined file,
//! one score-ranked file per chapter, and the statistics summary.
//!
//! A paper that matches several chapters is stored once; chapters hold
//! indices into the shared paper list.

mod stats;

pub use stats::{ChapterStats, ExtractionStats, TOP_KEYWORDS_LIMIT, top_keywords};

use std::cmp::Reverse;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::classify::{Categories, Classifier};
use crate::corpus::{CorpusError, discover_corpus_files, load_records};
use crate::output::{OutputError, ensure_dir, write_json_pretty, write_jsonl};
use crate::paper::Paper;

/// Corpus files whose name contains this marker are AI-augmented duplicates.
pub const DEFAULT_EXCLUDE_MARKER: &str = "_AI_enhanced_";
/// File holding every classified paper.
pub const ALL_PAPERS_FILE: &str = "all_survey_papers.jsonl";
/// File holding [`ExtractionStats`].
pub const STATS_FILE: &str = "extraction_stats.json";
/// Suffix appended to a chapter id to name its paper file.
pub const CHAPTER_FILE_SUFFIX: &str = "_papers.jsonl";

/// Name of the paper file for a chapter, e.g. `reward_model_rl_papers.jsonl`.
#[must_use]
pub fn chapter_file_name(chapter_id: &str) -> String {
    format!("{chapter_id}{CHAPTER_FILE_SUFFIX}")
}

/// A paper stamped with its classification and source file.
#[derive(Debug, Clone)]
pub struct ClassifiedPaper {
    /// The record, including `survey_categories` and `source_file`
    pub paper: Paper,
    /// Parsed classification, mirrors `survey_categories`
    pub categories: Categories,
}

/// Papers assigned to one chapter.
#[derive(Debug, Clone)]
pub struct ChapterPapers {
    /// Chapter id
    pub id: String,
    /// Chapter display name
    pub name: String,
    /// Indices into [`Extraction::papers`], in corpus order
    pub members: Vec<usize>,
}

impl ChapterPapers {
    /// Number of papers in the chapter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if no paper landed in the chapter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Accumulated result of classifying a corpus.
#[derive(Debug, Clone)]
pub struct Extraction {
    papers: Vec<ClassifiedPaper>,
    chapters: Vec<ChapterPapers>,
    files_processed: usize,
    skipped_lines: usize,
    unreadable_files: usize,
}

impl Extraction {
    /// Creates an empty extraction with one bucket per classifier chapter.
    #[must_use]
    pub fn new(classifier: &Classifier) -> Self {
        let chapters = classifier
            .chapters()
            .map(|(id, name)| ChapterPapers {
                id: id.to_string(),
                name: name.to_string(),
                members: Vec::new(),
            })
            .collect();
        Self {
            papers: Vec::new(),
            chapters,
            files_processed: 0,
            skipped_lines: 0,
            unreadable_files: 0,
        }
    }

    /// Classifies `records` read from the file named `source_name`.
    ///
    /// Returns how many of them were kept.
    pub fn ingest(
        &mut self,
        classifier: &Classifier,
        source_name: &str,
        records: Vec<Paper>,
    ) -> usize {
        let before = self.papers.len();
        for mut paper in records {
            let categories = classifier.classify(&paper);
            if categories.is_empty() {
                continue;
            }
            paper.set_categories(&categories);
            paper.set_source_file(source_name);

            let index = self.papers.len();
            for chapter in &mut self.chapters {
                if categories.get(&chapter.id).is_some() {
                    chapter.members.push(index);
                }
            }
            self.papers.push(ClassifiedPaper { paper, categories });
        }
        self.papers.len() - before
    }

    /// Loads one corpus file and ingests its records.
    ///
    /// Unreadable files and malformed lines are counted, not propagated.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn ingest_file(&mut self, classifier: &Classifier, path: &Path) -> usize {
        let outcome = load_records(path);
        self.files_processed += 1;
        self.skipped_lines += outcome.skipped_count();
        if outcome.unreadable {
            self.unreadable_files += 1;
        }

        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let loaded = outcome.len();
        let kept = self.ingest(classifier, &source_name, outcome.records);
        debug!(loaded, kept, skipped = outcome.skipped.len(), "Processed corpus file");
        kept
    }

    /// Every classified paper in corpus order.
    #[must_use]
    pub fn papers(&self) -> &[ClassifiedPaper] {
        &self.papers
    }

    /// Chapter buckets in taxonomy order.
    #[must_use]
    pub fn chapters(&self) -> &[ChapterPapers] {
        &self.chapters
    }

    /// Looks up a chapter bucket by id.
    #[must_use]
    pub fn chapter(&self, id: &str) -> Option<&ChapterPapers> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    /// Papers of a chapter sorted by that chapter's score, highest first.
    ///
    /// Equal scores keep corpus order.
    #[must_use]
    pub fn ranked(&self, chapter: &ChapterPapers) -> Vec<&ClassifiedPaper> {
        let mut ranked: Vec<&ClassifiedPaper> =
            chapter.members.iter().map(|&index| &self.papers[index]).collect();
        ranked.sort_by_key(|classified| Reverse(classified.categories.score(&chapter.id)));
        ranked
    }

    /// Returns true if no paper was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Number of corpus files ingested.
    #[must_use]
    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    /// Total malformed lines skipped across all files.
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Number of corpus files that could not be read.
    #[must_use]
    pub fn unreadable_files(&self) -> usize {
        self.unreadable_files
    }
}

/// Classifies every non-excluded corpus file in `corpus_dir`.
///
/// # Errors
/// Returns [`CorpusError::ListDir`] if the directory cannot be listed.
#[instrument(skip(classifier))]
pub fn extract_all(
    corpus_dir: &Path,
    classifier: &Classifier,
    exclude_marker: &str,
) -> Result<Extraction, CorpusError> {
    let files = discover_corpus_files(corpus_dir, exclude_marker)?;
    info!(files = files.len(), "Found corpus files");

    let mut extraction = Extraction::new(classifier);
    for path in &files {
        extraction.ingest_file(classifier, path);
    }
    Ok(extraction)
}

/// Writes the combined file, per-chapter files and statistics to `output_dir`.
///
/// Every chapter gets a file, even when empty, so downstream steps always
/// find one.
///
/// # Errors
/// Returns [`OutputError`] if the directory or any file cannot be written.
#[instrument(skip(extraction), fields(papers = extraction.papers().len()))]
pub fn persist(extraction: &Extraction, output_dir: &Path) -> Result<ExtractionStats, OutputError> {
    ensure_dir(output_dir)?;

    write_jsonl(
        &output_dir.join(ALL_PAPERS_FILE),
        extraction.papers().iter().map(|classified| &classified.paper),
    )?;

    for chapter in extraction.chapters() {
        let ranked = extraction.ranked(chapter);
        let path = output_dir.join(chapter_file_name(&chapter.id));
        write_jsonl(&path, ranked.into_iter().map(|classified| &classified.paper))?;
        debug!(chapter = %chapter.id, papers = chapter.len(), "Wrote chapter file");
    }

    let stats = ExtractionStats::from_extraction(extraction);
    write_json_pretty(&output_dir.join(STATS_FILE), &stats)?;

    info!(
        total = stats.total_papers,
        dir = %output_dir.display(),
        "Saved extracted papers"
    );
    Ok(stats)
}
