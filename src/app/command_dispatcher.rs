//! CLI command routing.
//!
//! A missing subcommand runs the whole pipeline with default paths, exactly
//! as `run` with no arguments would.

use anyhow::Result;
use tracing::info;

use crate::app::config_manager::{self, ResolvedConfig};
use crate::cli::{Command, RunArgs};
use crate::commands::{self, ExtractPlan};

/// The command to execute, defaulting to `run`.
pub(crate) fn effective_command(command: Option<&Command>) -> Command {
    command
        .cloned()
        .unwrap_or_else(|| Command::Run(RunArgs::default()))
}

pub(crate) fn dispatch(command: &Command, resolved: &ResolvedConfig) -> Result<()> {
    let settings = &resolved.settings;
    match command {
        Command::Config => {
            commands::run_config_show_command(resolved);
            Ok(())
        }
        Command::Taxonomy => {
            let taxonomy = config_manager::load_taxonomy(settings)?;
            commands::run_taxonomy_command(&taxonomy)
        }
        Command::Extract(args) => {
            let taxonomy = config_manager::load_taxonomy(settings)?;
            commands::run_extract_command(args, settings, &taxonomy)
        }
        Command::Split(args) => {
            let taxonomy = config_manager::load_taxonomy(settings)?;
            commands::run_split_command(args, settings, &taxonomy)
        }
        Command::Analyze(args) => {
            let taxonomy = config_manager::load_taxonomy(settings)?;
            commands::run_analyze_command(args, settings, &taxonomy)
        }
        Command::Run(args) => run_pipeline(args, resolved),
    }
}

fn run_pipeline(args: &RunArgs, resolved: &ResolvedConfig) -> Result<()> {
    let settings = &resolved.settings;
    let taxonomy = config_manager::load_taxonomy(settings)?;
    let corpus_dir = args.corpus_dir.as_deref().unwrap_or(&settings.corpus_dir);
    let survey_dir = args.survey_dir.as_deref().unwrap_or(&settings.survey_dir);
    let split_dir = args.split_dir.as_deref().unwrap_or(&settings.split_dir);
    let exclude_marker = args
        .exclude_marker
        .as_deref()
        .unwrap_or(&settings.exclude_marker);

    let plan = ExtractPlan {
        corpus_dir,
        output_dir: survey_dir,
        exclude_marker,
        quiet: settings.quiet,
    };
    if commands::run_extraction(&plan, &taxonomy)?.is_none() {
        info!("Nothing extracted, skipping split and analysis");
        return Ok(());
    }

    println!();
    commands::run_split(survey_dir, split_dir, &taxonomy)?;

    let analyze_args = crate::cli::AnalyzeArgs {
        survey_dir: Some(survey_dir.to_path_buf()),
        top: args.top,
    };
    commands::run_analyze_command(&analyze_args, settings, &taxonomy)?;

    info!(
        survey_dir = %survey_dir.display(),
        split_dir = %split_dir.display(),
        "Pipeline complete"
    );
    Ok(())
}
