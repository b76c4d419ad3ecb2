//! `markwire check`: verify a file still carries its scaffold markers.

use serde::Serialize;
use tracing::instrument;

use markwire_adapters::LocalFilesystem;
use markwire_core::{
    application::InsertService,
    domain::{Marker, MarkerLocation},
};

use crate::{
    cli::CheckArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct Report<'a> {
    path: &'a std::path::Path,
    ok: bool,
    markers: &'a [MarkerLocation],
}

/// Each configured marker, plus any `--marker`, must occur exactly once.
#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut markers: Vec<Marker> = config
        .marker_set()
        .map_err(|e| CliError::ConfigError {
            message: format!("markers: {e}"),
            source: Some(Box::new(e)),
        })?
        .iter()
        .map(|(_, m)| m.clone())
        .collect();
    for extra in &args.markers {
        let marker = Marker::new(extra.as_str())?;
        if !markers.contains(&marker) {
            markers.push(marker);
        }
    }

    let service = InsertService::new(Box::new(LocalFilesystem::new()));
    let locations = service.locate(&args.file, &markers)?;

    let missing: Vec<String> = locations
        .iter()
        .filter(|l| l.is_missing())
        .map(|l| l.marker.to_string())
        .collect();
    let duplicated: Vec<String> = locations
        .iter()
        .filter(|l| l.lines.len() > 1)
        .map(|l| l.marker.to_string())
        .collect();
    let ok = missing.is_empty() && duplicated.is_empty();

    if output.is_json() {
        output.json(&Report {
            path: &args.file,
            ok,
            markers: &locations,
        })?;
    } else {
        for location in &locations {
            if location.is_unique() {
                output.success(&format!("line {}: {}", location.lines[0], location.marker))?;
            } else if location.is_missing() {
                output.warning(&format!("missing: {}", location.marker))?;
            } else {
                output.warning(&format!(
                    "lines {:?}: {}",
                    location.lines, location.marker
                ))?;
            }
        }
    }

    if ok {
        Ok(())
    } else {
        Err(CliError::MarkerCheckFailed {
            path: args.file,
            missing,
            duplicated,
        })
    }
}
