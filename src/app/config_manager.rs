//! Configuration lifecycle: load file config, merge CLI, resolve settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use survey_curator::Taxonomy;
use tracing::debug;

use crate::app::config_runtime::{self, CliValueSources, Settings};
use crate::app_config::load_file_config_from;
use crate::cli::Cli;

/// Resolved configuration bundle handed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub(crate) settings: Settings,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) loaded_from_file: bool,
}

/// Load file config and merge CLI overrides.
pub(crate) fn resolve_config(cli: &Cli, cli_sources: &CliValueSources) -> Result<ResolvedConfig> {
    let loaded_config = load_file_config_from(cli.config.as_deref())?;
    let settings =
        config_runtime::apply_config_defaults(cli, cli_sources, loaded_config.config.as_ref());
    Ok(ResolvedConfig {
        settings,
        config_path: loaded_config.path,
        loaded_from_file: loaded_config.loaded_from_file,
    })
}

/// Loads the taxonomy file named in the settings, or the built-in chapters.
pub(crate) fn load_taxonomy(settings: &Settings) -> Result<Taxonomy> {
    let Some(path) = settings.taxonomy_file.as_deref() else {
        debug!("Using built-in taxonomy");
        return Ok(Taxonomy::builtin());
    };
    let taxonomy = Taxonomy::load(path)
        .with_context(|| format!("Failed to load taxonomy '{}'", path.display()))?;
    debug!(path = %path.display(), chapters = taxonomy.len(), "Loaded taxonomy file");
    Ok(taxonomy)
}
