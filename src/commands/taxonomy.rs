//! Taxonomy command: print the effective chapter keywords.

use anyhow::{Context, Result};
use survey_curator::Taxonomy;

pub(crate) fn run_taxonomy_command(taxonomy: &Taxonomy) -> Result<()> {
    println!("{}", render_taxonomy(taxonomy)?);
    Ok(())
}

/// Pretty JSON in the same shape `--taxonomy` accepts.
pub(crate) fn render_taxonomy(taxonomy: &Taxonomy) -> Result<String> {
    serde_json::to_string_pretty(taxonomy).context("Failed to serialize taxonomy")
}
