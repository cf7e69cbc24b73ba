//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use survey_curator::dates::DEFAULT_REPORT_LIMIT;

/// Default number of dates listed per report section.
pub const DEFAULT_TOP: u8 = DEFAULT_REPORT_LIMIT as u8;

/// Curate survey chapters from a corpus of paper metadata.
///
/// Survey Curator classifies JSON Lines paper records into survey chapters by
/// keyword, then splits the chapter files by collection date and reports how
/// papers are distributed over dates. Without a subcommand the whole pipeline
/// runs with default paths.
#[derive(Parser, Debug)]
#[command(name = "survey-curator")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/survey-curator/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON taxonomy file replacing the built-in chapter keywords
    #[arg(long, global = true, value_name = "PATH")]
    pub taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Pipeline steps.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify corpus files into chapter files and statistics
    Extract(ExtractArgs),
    /// Split chapter files into one file per date
    Split(SplitArgs),
    /// Report the date distribution of chapter files
    Analyze(AnalyzeArgs),
    /// Extract, split and analyze in one go (default)
    Run(RunArgs),
    /// Print the effective taxonomy as JSON
    Taxonomy,
    /// Show the effective configuration
    Config,
}

/// Arguments of `extract`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractArgs {
    /// Directory holding the corpus .jsonl files (default: data)
    #[arg(long, value_name = "DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Directory receiving chapter files and statistics (default: survey_data)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip corpus files whose name contains this marker (default: _AI_enhanced_)
    #[arg(long, value_name = "MARKER")]
    pub exclude_marker: Option<String>,
}

/// Arguments of `split`.
#[derive(Args, Debug, Clone, Default)]
pub struct SplitArgs {
    /// Directory holding the chapter files (default: survey_data)
    #[arg(long, value_name = "DIR")]
    pub survey_dir: Option<PathBuf>,

    /// Directory receiving per-date files (default: survey_data_by_date)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Arguments of `analyze`.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory holding the chapter files (default: survey_data)
    #[arg(long, value_name = "DIR")]
    pub survey_dir: Option<PathBuf>,

    /// Dates listed in each report section (1-100)
    #[arg(long, default_value_t = DEFAULT_TOP, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub top: u8,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            survey_dir: None,
            top: DEFAULT_TOP,
        }
    }
}

/// Arguments of `run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Directory holding the corpus .jsonl files (default: data)
    #[arg(long, value_name = "DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Directory for chapter files and statistics (default: survey_data)
    #[arg(long, value_name = "DIR")]
    pub survey_dir: Option<PathBuf>,

    /// Directory for per-date files (default: survey_data_by_date)
    #[arg(long, value_name = "DIR")]
    pub split_dir: Option<PathBuf>,

    /// Skip corpus files whose name contains this marker (default: _AI_enhanced_)
    #[arg(long, value_name = "MARKER")]
    pub exclude_marker: Option<String>,

    /// Dates listed in each report section (1-100)
    #[arg(long, default_value_t = DEFAULT_TOP, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub top: u8,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            corpus_dir: None,
            survey_dir: None,
            split_dir: None,
            exclude_marker: None,
            top: DEFAULT_TOP,
        }
    }
}
