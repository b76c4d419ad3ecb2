//! Diagnostics for the `markwire` binary.
//!
//! Core and adapters emit spans for every read, splice and replace; this is
//! the only place a subscriber is installed. Events go to stderr so that
//! stdout stays clean for diffs and `--output-format json` documents.
//!
//! `-q` logs errors only, no flag logs warnings, and each `-v` steps through
//! info, debug and trace. `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events are shown at the requested level.
const TARGETS: [&str; 3] = ["markwire", "markwire_core", "markwire_adapters"];

/// Install the global subscriber. Call once, before anything is logged.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let registry = tracing_subscriber::registry().with(filter);

    // JSON runs log as JSON lines too, so a wrapper can parse both streams.
    let installed = if args.output_format == OutputFormat::Json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(!args.no_color && std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `markwire=info,markwire_core=info,...`
fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
