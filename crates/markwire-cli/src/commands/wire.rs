//! Implementation of the `markwire wire` command.
//!
//! Responsibility: resolve the resource and project from flags, the PROJECT
//! file and configuration, call the core wiring service, and display the
//! result.

use tracing::{debug, info, instrument};

use markwire_adapters::{LocalFilesystem, ProjectFile};
use markwire_core::application::ports::Filesystem;
use markwire_core::{
    application::{InsertService, WiringService},
    domain::{Project, Resource, WireMode},
};

use crate::{
    cli::WireArgs,
    commands::{report_outcome, report_rewrite, resolve_placement},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `markwire wire` command.
///
/// 1. Build the `Resource` from flags
/// 2. Resolve repo/domain: flags, then the PROJECT file, then config
/// 3. Plan and apply (or preview with `--dry-run`)
#[instrument(skip_all, fields(file = %args.file.display(), kind = %args.kind))]
pub fn execute(args: WireArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mode = args.mode();
    let resource = Resource::new(args.group.as_str(), args.api_version.as_str(), args.kind.as_str());

    let project_file = load_project_file(&args, &config)?;
    let project = resolve_project(&args, &config, project_file.as_ref(), &resource, mode)?;

    if let Some(file) = &project_file {
        if !file.has_resource(&resource) {
            output.warning(&format!(
                "{}/{} {} is not recorded in the PROJECT file",
                resource.group_domain(&project),
                resource.version(),
                resource.kind()
            ))?;
        }
    }

    let placement = resolve_placement(args.placement, &config)?;
    let markers = config.marker_set().map_err(|e| CliError::ConfigError {
        message: format!("markers: {e}"),
        source: Some(Box::new(e)),
    })?;
    debug!(%mode, %placement, repo = project.repo(), "Wiring resolved");

    let service = WiringService::new(
        InsertService::new(Box::new(LocalFilesystem::new())).with_placement(placement),
    )
    .with_markers(markers);

    if args.dry_run {
        let rewrite = service.preview(&args.file, &resource, &project, mode)?;
        return report_rewrite(&rewrite, &output);
    }

    let outcome = service.wire(&args.file, &resource, &project, mode)?;
    info!(lines = outcome.inserted_lines(), "Wire completed");

    report_outcome(
        &outcome,
        &format!(
            "Wired {} {} into {}",
            resource.kind(),
            mode,
            args.file.display()
        ),
        &output,
    )
}

/// Load the PROJECT file if one is available.
///
/// An explicit `--project-file` must exist; the configured default is
/// skipped when absent.
fn load_project_file(args: &WireArgs, config: &AppConfig) -> CliResult<Option<ProjectFile>> {
    let fs = LocalFilesystem::new();
    let (path, required) = match &args.project_file {
        Some(path) => (path.as_path(), true),
        None => (config.project.project_file.as_path(), false),
    };

    if !required && !fs.exists(path) {
        debug!(path = %path.display(), "No PROJECT file");
        return Ok(None);
    }

    Ok(Some(ProjectFile::load(&fs, path)?))
}

fn resolve_project(
    args: &WireArgs,
    config: &AppConfig,
    project_file: Option<&ProjectFile>,
    resource: &Resource,
    mode: WireMode,
) -> CliResult<Project> {
    let repo = args
        .repo
        .clone()
        .or_else(|| non_empty(project_file.map(|f| f.repo.as_str())))
        .or_else(|| config.project.repo.clone());
    let domain = args
        .domain
        .clone()
        .or_else(|| non_empty(project_file.map(|f| f.domain.as_str())))
        .or_else(|| config.project.domain.clone())
        .unwrap_or_default();

    // Only API types from built-in groups can be wired without a module path.
    let needs_repo = mode != WireMode::Resource || !resource.is_core_group();
    let repo = match repo {
        Some(repo) => repo,
        None if needs_repo => return Err(CliError::MissingProjectAttribute { field: "repo" }),
        None => String::new(),
    };

    Ok(Project::new(repo, domain))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
