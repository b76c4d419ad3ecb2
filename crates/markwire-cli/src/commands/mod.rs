//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and render the results.
//! No splicing or composition logic lives here.

pub mod check;
pub mod completions;
pub mod config;
pub mod insert;
pub mod wire;

use markwire_core::{
    application::{InsertOutcome, Rewrite},
    domain::Placement,
};
use serde::Serialize;

use crate::{
    cli::PlacementArg,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// `--placement` wins over the `insert.placement` config value.
pub(crate) fn resolve_placement(
    flag: Option<PlacementArg>,
    config: &AppConfig,
) -> CliResult<Placement> {
    match flag {
        Some(arg) => Ok(arg.into()),
        None => config.placement().map_err(|e| CliError::ConfigError {
            message: format!("insert.placement: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

/// Print a completed insertion.
pub(crate) fn report_outcome(
    outcome: &InsertOutcome,
    headline: &str,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(outcome)?;
        return Ok(());
    }

    if !outcome.written {
        output.info(&format!("Nothing to insert into {}", outcome.path.display()))?;
        return Ok(());
    }

    output.success(headline)?;
    for hit in &outcome.markers {
        output.print(&format!(
            "  {} line(s) {} line {}: {}",
            hit.inserted,
            match outcome.placement {
                Placement::Below => "below",
                Placement::Above => "above",
            },
            hit.line,
            hit.marker
        ))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct DryRun<'a> {
    path: &'a std::path::Path,
    placement: Placement,
    changed: bool,
    before: &'a str,
    after: &'a str,
}

/// Print a would-be rewrite without writing it.
pub(crate) fn report_rewrite(rewrite: &Rewrite, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&DryRun {
            path: &rewrite.path,
            placement: rewrite.placement,
            changed: rewrite.is_change(),
            before: &rewrite.before,
            after: &rewrite.after,
        })?;
        return Ok(());
    }

    if !rewrite.is_change() {
        output.info(&format!("No changes for {}", rewrite.path.display()))?;
        return Ok(());
    }

    output.diff(&rewrite.path, &rewrite.before, &rewrite.after)?;
    output.info("Dry run: no files were written")?;
    Ok(())
}
