//! CLI command handlers.

mod analyze;
mod config;
mod extract;
mod split;
mod taxonomy;

pub(crate) use analyze::run_analyze_command;
pub(crate) use config::run_config_show_command;
pub(crate) use extract::{ExtractPlan, run_extract_command, run_extraction};
pub(crate) use split::{run_split, run_split_command};
pub(crate) use taxonomy::run_taxonomy_command;
