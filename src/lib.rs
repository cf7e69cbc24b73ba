//! Survey Curator Core Library
//!
//! This library sorts a corpus of academic-paper metadata records into survey
//! chapters by keyword, then reorganizes the chapter files by the date each
//! paper was collected.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`taxonomy`] - Chapter keyword tables (built-in or loaded from JSON)
//! - [`classify`] - Word-boundary keyword matching and per-chapter scoring
//! - [`corpus`] - Tolerant JSON Lines reading and corpus file discovery
//! - [`extract`] - Corpus-wide extraction, chapter files and statistics
//! - [`dates`] - Date partitioning and date distribution analysis
//! - [`output`] - JSON Lines and pretty JSON writers
//! - [`paper`] - The open paper record

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod corpus;
pub mod dates;
pub mod extract;
pub mod output;
pub mod paper;
pub mod taxonomy;

// Re-export commonly used types
pub use classify::{Categories, CategoryMatch, Classifier, KeywordMatcher, categorize_paper, match_keywords};
pub use corpus::{CorpusError, LoadOutcome, SkippedLine, discover_corpus_files, load_records};
pub use dates::{
    DateCounts, DateIndex, DistributionReport, SplitSummary, analyze_dates, date_token,
    split_by_date,
};
pub use extract::{
    DEFAULT_EXCLUDE_MARKER, Extraction, ExtractionStats, chapter_file_name, extract_all, persist,
};
pub use output::OutputError;
pub use paper::Paper;
pub use taxonomy::{Chapter, Taxonomy, TaxonomyError};
