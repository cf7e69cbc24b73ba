use std::path::PathBuf;

use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use survey_curator::DEFAULT_EXCLUDE_MARKER;

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Cli;

pub(crate) const DEFAULT_CORPUS_DIR: &str = "data";
pub(crate) const DEFAULT_SURVEY_DIR: &str = "survey_data";
pub(crate) const DEFAULT_SPLIT_DIR: &str = "survey_data_by_date";

/// Which global flags were typed on the command line (as opposed to defaults).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
    pub(crate) taxonomy: bool,
}

/// Effective pipeline settings before per-command overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) corpus_dir: PathBuf,
    pub(crate) survey_dir: PathBuf,
    pub(crate) split_dir: PathBuf,
    pub(crate) taxonomy_file: Option<PathBuf>,
    pub(crate) exclude_marker: String,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            survey_dir: PathBuf::from(DEFAULT_SURVEY_DIR),
            split_dir: PathBuf::from(DEFAULT_SPLIT_DIR),
            taxonomy_file: None,
            exclude_marker: DEFAULT_EXCLUDE_MARKER.to_string(),
            verbose: 0,
            quiet: false,
        }
    }
}

pub(crate) fn parse_cli_with_sources() -> (Cli, CliValueSources) {
    let command = Cli::command();
    let matches = command.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    let sources = CliValueSources {
        verbose: is_commandline_value(&matches, "verbose"),
        quiet: is_commandline_value(&matches, "quiet"),
        taxonomy: is_commandline_value(&matches, "taxonomy"),
    };
    (cli, sources)
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Merges CLI globals over the config file over built-in defaults.
pub(crate) fn apply_config_defaults(
    cli: &Cli,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Settings {
    let mut settings = Settings {
        verbose: cli.verbose,
        quiet: cli.quiet,
        ..Settings::default()
    };

    if let Some(file_config) = file_config {
        if let Some(corpus_dir) = &file_config.corpus_dir {
            settings.corpus_dir = corpus_dir.clone();
        }
        if let Some(survey_dir) = &file_config.survey_dir {
            settings.survey_dir = survey_dir.clone();
        }
        if let Some(split_dir) = &file_config.split_dir {
            settings.split_dir = split_dir.clone();
        }
        if let Some(exclude_marker) = &file_config.exclude_marker {
            settings.exclude_marker = exclude_marker.clone();
        }
        if !cli_sources.taxonomy
            && let Some(taxonomy_file) = &file_config.taxonomy_file
        {
            settings.taxonomy_file = Some(taxonomy_file.clone());
        }
        if !cli_sources.verbose
            && !cli_sources.quiet
            && let Some(verbosity) = file_config.verbosity
        {
            apply_config_verbosity(&mut settings, verbosity);
        }
    }

    if let Some(taxonomy) = &cli.taxonomy {
        settings.taxonomy_file = Some(taxonomy.clone());
    }
    settings
}

fn apply_config_verbosity(settings: &mut Settings, verbosity: VerbositySetting) {
    match verbosity {
        VerbositySetting::Default => {
            settings.quiet = false;
            settings.verbose = 0;
        }
        VerbositySetting::Verbose => {
            settings.quiet = false;
            settings.verbose = 1;
        }
        VerbositySetting::Quiet => {
            settings.quiet = true;
            settings.verbose = 0;
        }
        VerbositySetting::Debug => {
            settings.quiet = false;
            settings.verbose = 2;
        }
    }
}

pub(crate) fn resolve_default_log_level(settings: &Settings) -> &'static str {
    if settings.quiet {
        "error"
    } else {
        match settings.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn should_force_cli_log_level(cli_sources: &CliValueSources) -> bool {
    cli_sources.verbose || cli_sources.quiet
}

pub(crate) fn verbosity_label(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        VerbositySetting::Quiet.as_str()
    } else if verbose == 0 {
        VerbositySetting::Default.as_str()
    } else if verbose == 1 {
        VerbositySetting::Verbose.as_str()
    } else {
        VerbositySetting::Debug.as_str()
    }
}
