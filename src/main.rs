//! CLI entry point for the survey curator.

use anyhow::Result;

mod app;
mod app_config;
mod cli;
mod commands;

fn main() -> Result<()> {
    app::runtime::run_curator()
}
