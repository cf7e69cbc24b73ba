//! Config command handler: show effective configuration.

use crate::app::config_manager::ResolvedConfig;
use crate::app::config_runtime::verbosity_label;

pub(crate) fn run_config_show_command(resolved: &ResolvedConfig) {
    for line in config_lines(resolved) {
        println!("{line}");
    }
}

fn config_lines(resolved: &ResolvedConfig) -> Vec<String> {
    let settings = &resolved.settings;
    let config_path = resolved.config_path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    let taxonomy = settings.taxonomy_file.as_ref().map_or_else(
        || "<built-in>".to_string(),
        |path| path.display().to_string(),
    );

    vec![
        format!("config_path = {config_path}"),
        format!(
            "config_file = {}",
            if resolved.loaded_from_file {
                "loaded"
            } else {
                "not found (using defaults)"
            }
        ),
        format!("corpus_dir = {}", settings.corpus_dir.display()),
        format!("survey_dir = {}", settings.survey_dir.display()),
        format!("split_dir = {}", settings.split_dir.display()),
        format!("taxonomy_file = {taxonomy}"),
        format!("exclude_marker = \"{}\"", settings.exclude_marker),
        format!(
            "verbosity = {}",
            verbosity_label(settings.verbose, settings.quiet)
        ),
    ]
}
