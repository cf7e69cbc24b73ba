//! Process entry flow: parse CLI, resolve config, initialize logging, dispatch.

use anyhow::Result;
use tracing::debug;

use crate::app::{command_dispatcher, config_manager, config_runtime, terminal};

pub(crate) fn run_curator() -> Result<()> {
    let (cli, cli_sources) = config_runtime::parse_cli_with_sources();
    let resolved = config_manager::resolve_config(&cli, &cli_sources)?;

    let default_level = config_runtime::resolve_default_log_level(&resolved.settings);
    let force_cli_log_level = config_runtime::should_force_cli_log_level(&cli_sources);
    terminal::init_tracing(
        default_level,
        force_cli_log_level,
        terminal::is_no_color_requested(),
    );

    debug!(?cli, "CLI arguments parsed");
    if resolved.loaded_from_file
        && let Some(path) = &resolved.config_path
    {
        debug!(path = %path.display(), "Loaded config file");
    }

    let command = command_dispatcher::effective_command(cli.command.as_ref());
    command_dispatcher::dispatch(&command, &resolved)
}
