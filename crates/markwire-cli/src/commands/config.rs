//! `markwire config`: inspect and initialise configuration.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `path` and `init` act on the `--config` file when one was given,
/// otherwise on whichever default file `AppConfig::load` would let win.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    let target = AppConfig::active_path(config_file.as_deref());

    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ key: value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&to_toml(&config)?)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&target.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            if target.exists() && !force {
                return Err(CliError::ConfigError {
                    message: format!(
                        "{} already exists (use --force to overwrite)",
                        target.display()
                    ),
                    source: None,
                });
            }

            let toml = to_toml(&AppConfig::default())?;
            if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_cli_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&target, toml)
                .with_cli_context(|| format!("Failed to write config to '{}'", target.display()))?;

            output.success(&format!("Configuration created at {}", target.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "project.repo" => Ok(config.project.repo.clone().unwrap_or_default()),
        "project.domain" => Ok(config.project.domain.clone().unwrap_or_default()),
        "project.project_file" => Ok(config.project.project_file.display().to_string()),
        "markers.imports" => Ok(config.markers.imports.clone()),
        "markers.scheme" => Ok(config.markers.scheme.clone()),
        "markers.builder" => Ok(config.markers.builder.clone()),
        "insert.placement" => Ok(config.insert.placement.clone()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
