//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use markwire_core::domain::{Placement, WireMode};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "markwire",
    bin_name = "markwire",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Insert code fragments at scaffold markers",
    long_about = "Markwire updates generated source files in place by inserting \
                  code fragments next to well-known marker comments, such as the \
                  kubebuilder scaffold markers in an operator's main.go.",
    after_help = "EXAMPLES:\n\
        \x20 markwire wire --group ship --version v1beta1 --kind Frigate --controller\n\
        \x20 markwire insert main.go --marker '// +kubebuilder:scaffold:imports' 'foo \"example.com/foo\"'\n\
        \x20 markwire check main.go\n\
        \x20 markwire completions bash > /usr/share/bash-completion/completions/markwire",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Wire a resource, controller or webhook into a scaffolded main.go.
    #[command(
        visible_alias = "w",
        about = "Wire a resource into a scaffolded entry point",
        after_help = "EXAMPLES:\n\
            \x20 markwire wire --group ship --version v1beta1 --kind Frigate --resource\n\
            \x20 markwire wire --group ship --version v1beta1 --kind Frigate --controller\n\
            \x20 markwire wire cmd/main.go -g apps -V v1 -k Deployment --webhook --dry-run"
    )]
    Wire(WireArgs),

    /// Insert arbitrary fragments at a marker.
    #[command(
        visible_alias = "i",
        about = "Insert fragments at markers",
        after_help = "EXAMPLES:\n\
            \x20 markwire insert main.go --marker '// +kubebuilder:scaffold:scheme' '_ = foo.AddToScheme(scheme)'\n\
            \x20 markwire insert main.go --request fragments.json\n\
            \x20 markwire insert main.go -m '// marker' first second --placement above"
    )]
    Insert(InsertArgs),

    /// Verify that the scaffold markers are present exactly once.
    #[command(
        about = "Check a file for scaffold markers",
        after_help = "EXAMPLES:\n\
            \x20 markwire check\n\
            \x20 markwire check cmd/main.go --marker '// +custom:marker'"
    )]
    Check(CheckArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 markwire completions bash > ~/.local/share/bash-completion/completions/markwire\n\
            \x20 markwire completions zsh  > ~/.zfunc/_markwire\n\
            \x20 markwire completions fish > ~/.config/fish/completions/markwire.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Markwire configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 markwire config get project.repo\n\
            \x20 markwire config list\n\
            \x20 markwire config init --force"
    )]
    Config(ConfigCommands),
}

// ── wire ──────────────────────────────────────────────────────────────────────

/// Arguments for `markwire wire`.
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(false)
        .args(["resource", "controller", "webhook"])
))]
pub struct WireArgs {
    /// File to update.
    #[arg(value_name = "FILE", default_value = "main.go", help = "File to update")]
    pub file: PathBuf,

    /// API group, e.g. `ship` or `apps`.
    #[arg(short = 'g', long = "group", value_name = "GROUP", help = "API group")]
    pub group: String,

    /// API version, e.g. `v1beta1`.
    #[arg(
        short = 'V',
        long = "version",
        value_name = "VERSION",
        help = "API version"
    )]
    pub api_version: String,

    /// Resource kind, e.g. `Frigate`.
    #[arg(short = 'k', long = "kind", value_name = "KIND", help = "Resource kind")]
    pub kind: String,

    /// Wire the API types only.
    #[arg(long = "resource", help = "Wire API types (import + scheme)")]
    pub resource: bool,

    /// Wire the API types and a reconciler.
    #[arg(long = "controller", help = "Wire API types and a reconciler")]
    pub controller: bool,

    /// Wire the API types and a webhook.
    #[arg(long = "webhook", help = "Wire API types and a webhook")]
    pub webhook: bool,

    /// Go module path; overrides the PROJECT file and configuration.
    #[arg(long = "repo", value_name = "MODULE", help = "Go module path")]
    pub repo: Option<String>,

    /// API domain; overrides the PROJECT file and configuration.
    #[arg(long = "domain", value_name = "DOMAIN", help = "API domain")]
    pub domain: Option<String>,

    /// PROJECT file to read repo and domain from.
    #[arg(
        long = "project-file",
        value_name = "PATH",
        help = "PROJECT file to read repo/domain from"
    )]
    pub project_file: Option<PathBuf>,

    /// Where fragments go relative to their marker.
    #[arg(long = "placement", value_enum, help = "Insert above or below markers")]
    pub placement: Option<PlacementArg>,

    /// Show the change as a diff without writing.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,
}

impl WireArgs {
    /// The single wiring mode selected by the `mode` group.
    pub fn mode(&self) -> WireMode {
        if self.controller {
            WireMode::Controller
        } else if self.webhook {
            WireMode::Webhook
        } else {
            WireMode::Resource
        }
    }
}

// ── insert ────────────────────────────────────────────────────────────────────

/// Arguments for `markwire insert`.
#[derive(Debug, Args)]
pub struct InsertArgs {
    /// File to update.
    #[arg(value_name = "FILE", help = "File to update")]
    pub file: PathBuf,

    /// Marker line to insert at.
    #[arg(
        short = 'm',
        long = "marker",
        value_name = "MARKER",
        required_unless_present = "request",
        help = "Marker line to insert at"
    )]
    pub marker: Option<String>,

    /// Fragments to insert at `--marker`, in order.
    #[arg(value_name = "FRAGMENT", requires = "marker", help = "Fragments, in order")]
    pub fragments: Vec<String>,

    /// JSON file mapping markers to fragment lists.
    #[arg(
        short = 'r',
        long = "request",
        value_name = "JSON_FILE",
        help = "JSON object of marker -> [fragments]"
    )]
    pub request: Option<PathBuf>,

    /// Where fragments go relative to their marker.
    #[arg(long = "placement", value_enum, help = "Insert above or below markers")]
    pub placement: Option<PlacementArg>,

    /// Show the change as a diff without writing.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `markwire check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// File to check.
    #[arg(value_name = "FILE", default_value = "main.go", help = "File to check")]
    pub file: PathBuf,

    /// Additional markers to check besides the configured scaffold markers.
    #[arg(
        short = 'm',
        long = "marker",
        value_name = "MARKER",
        help = "Additional marker to check (repeatable)"
    )]
    pub markers: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `markwire completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `markwire config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.repo`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Fragment placement relative to the marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlacementArg {
    /// Directly after the marker (newest fragment closest to the marker).
    Below,
    /// Directly before the marker (fragments accumulate in call order).
    Above,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Below => Placement::Below,
            PlacementArg::Above => Placement::Above,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
