//! Implementation of the `markwire insert` command.

use std::path::Path;

use tracing::{info, instrument};

use markwire_adapters::LocalFilesystem;
use markwire_core::{
    application::{InsertService, ports::Filesystem},
    domain::{Fragment, InsertionRequest, Marker},
};

use crate::{
    cli::InsertArgs,
    commands::{report_outcome, report_rewrite, resolve_placement},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `markwire insert` command.
///
/// The request file (if any) is loaded first; `--marker` fragments are then
/// appended to it, so both can be combined in one invocation.
#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: InsertArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let filesystem = LocalFilesystem::new();
    let request = build_request(&args, &filesystem)?;
    let placement = resolve_placement(args.placement, &config)?;

    let service = InsertService::new(Box::new(filesystem)).with_placement(placement);

    if args.dry_run {
        let rewrite = service.preview(&args.file, &request)?;
        return report_rewrite(&rewrite, &output);
    }

    let outcome = service.insert(&args.file, &request)?;
    info!(lines = outcome.inserted_lines(), "Insert completed");

    report_outcome(
        &outcome,
        &format!(
            "Inserted {} line(s) into {}",
            outcome.inserted_lines(),
            args.file.display()
        ),
        &output,
    )
}

fn build_request(args: &InsertArgs, filesystem: &dyn Filesystem) -> CliResult<InsertionRequest> {
    let mut request = match &args.request {
        Some(path) => load_request(filesystem, path)?,
        None => InsertionRequest::new(),
    };

    if let Some(marker) = &args.marker {
        let marker = Marker::new(marker.as_str())?;
        let fragments = args
            .fragments
            .iter()
            .map(|f| Fragment::new(f.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        request.extend(marker, fragments);
    }

    Ok(request)
}

/// Parse a `{ "<marker>": ["<fragment>", ...] }` JSON document.
fn load_request(filesystem: &dyn Filesystem, path: &Path) -> CliResult<InsertionRequest> {
    let raw = filesystem.read_to_string(path)?;
    serde_json::from_str(&raw)
        .with_cli_context(|| format!("{} is not a valid insertion request", path.display()))
}
