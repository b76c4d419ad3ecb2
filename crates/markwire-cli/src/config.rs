//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MARKWIRE_<SECTION>__<KEY>`, e.g.
//!    `MARKWIRE_PROJECT__REPO`
//! 3. Config file: `--config FILE`, else the platform config dir, else
//!    `.markwire.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use markwire_core::domain::{
    BUILDER_MARKER, IMPORTS_MARKER, MarkerSet, Placement, SCHEME_MARKER,
};

/// Local config file name, used when no platform config dir is available.
pub const LOCAL_CONFIG: &str = ".markwire.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project attributes used when flags and the PROJECT file are silent.
    pub project: ProjectConfig,
    /// Marker text for each scaffold marker.
    pub markers: MarkerConfig,
    /// Insertion settings.
    pub insert: InsertConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub repo: Option<String>,
    pub domain: Option<String>,
    pub project_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub imports: String,
    pub scheme: String,
    pub builder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertConfig {
    pub placement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            repo: None,
            domain: None,
            project_file: PathBuf::from(markwire_adapters::PROJECT_FILE),
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            imports: IMPORTS_MARKER.into(),
            scheme: SCHEME_MARKER.into(),
            builder: BUILDER_MARKER.into(),
        }
    }
}

impl Default for InsertConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default().as_str().into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist when `require_file` is set. The default locations are always
    /// optional.
    pub fn load(config_file: Option<&PathBuf>, require_file: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path).required(require_file)),
            None => builder
                .add_source(toml_file(&Self::config_path()).required(false))
                .add_source(toml_file(Path::new(LOCAL_CONFIG)).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("MARKWIRE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize::<Self>()
            .context("Invalid configuration")?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.markwire.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "markwire", "markwire")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// The file that has the last word among the files `load` reads.
    ///
    /// `.markwire.toml` in the current directory is layered over the
    /// platform file, so it wins when present. When no file exists this is
    /// where `config init` writes.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        match config_file {
            Some(path) => path.to_path_buf(),
            None if Path::new(LOCAL_CONFIG).is_file() => PathBuf::from(LOCAL_CONFIG),
            None => Self::config_path(),
        }
    }

    /// Validated marker set from the `markers` section.
    pub fn marker_set(&self) -> Result<MarkerSet, markwire_core::domain::DomainError> {
        MarkerSet::from_texts(
            self.markers.imports.as_str(),
            self.markers.scheme.as_str(),
            self.markers.builder.as_str(),
        )
    }

    /// Placement from the `insert` section.
    pub fn placement(&self) -> Result<Placement, markwire_core::domain::DomainError> {
        self.insert.placement.parse()
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_markers_are_kubebuilder() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.markers.imports, IMPORTS_MARKER);
        assert_eq!(cfg.marker_set().unwrap(), MarkerSet::kubebuilder());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn default_placement_is_below() {
        assert_eq!(AppConfig::default().placement().unwrap(), Placement::Below);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[project]\nrepo = \"github.com/example/operator\"\n\n[insert]\nplacement = \"above\""
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf()), true).unwrap();
        assert_eq!(cfg.project.repo.as_deref(), Some("github.com/example/operator"));
        assert_eq!(cfg.placement().unwrap(), Placement::Above);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.markers.builder, BUILDER_MARKER);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/markwire.toml");
        assert!(AppConfig::load(Some(&path), true).is_err());
        assert!(AppConfig::load(Some(&path), false).is_ok());
    }

    #[test]
    fn blank_marker_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.markers.scheme = "   ".into();
        assert!(cfg.marker_set().is_err());
    }

    #[test]
    fn explicit_file_is_the_active_path() {
        let path = PathBuf::from("/tmp/custom.toml");
        assert_eq!(AppConfig::active_path(Some(&path)), path);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
