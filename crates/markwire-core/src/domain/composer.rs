//! Fragment composer.
//!
//! Each [`FragmentKind`] is a fixed Go snippet with named substitution
//! points. Composition is pure: the same kind with the same resource and
//! project always yields byte-identical text.
//!
//! | Kind | Shape | Marker |
//! |------|-------|--------|
//! | `import` | `<alias> "<api-package>/<version>"` | imports |
//! | `controllerImport` | `"<repo>/controllers"` | imports |
//! | `schemeRegistration` | `_ = <alias>.AddToScheme(scheme)` | scheme |
//! | `reconcilerWiring` | `controllers.<Kind>Reconciler` setup block | builder |
//! | `webhookWiring` | `<alias>.<Kind>` webhook setup block | builder |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{Project, Resource},
    error::DomainError,
    value_objects::{Fragment, ScaffoldMarker},
};

/// The closed set of fragment shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentKind {
    Import,
    ControllerImport,
    SchemeRegistration,
    ReconcilerWiring,
    WebhookWiring,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 5] = [
        Self::Import,
        Self::ControllerImport,
        Self::SchemeRegistration,
        Self::ReconcilerWiring,
        Self::WebhookWiring,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::ControllerImport => "controllerImport",
            Self::SchemeRegistration => "schemeRegistration",
            Self::ReconcilerWiring => "reconcilerWiring",
            Self::WebhookWiring => "webhookWiring",
        }
    }

    /// The scaffold marker this fragment is inserted at.
    pub const fn target(&self) -> ScaffoldMarker {
        match self {
            Self::Import | Self::ControllerImport => ScaffoldMarker::Imports,
            Self::SchemeRegistration => ScaffoldMarker::Scheme,
            Self::ReconcilerWiring | Self::WebhookWiring => ScaffoldMarker::Builder,
        }
    }

    /// Build the fragment text for `resource` in `project`.
    ///
    /// Only the fields the shape actually uses are checked. Inputs that
    /// would produce broken Go (empty values, whitespace, quotes, aliases
    /// that are not identifiers) fail with [`DomainError::Composition`]
    /// instead of emitting garbled text.
    pub fn compose(self, resource: &Resource, project: &Project) -> Result<Fragment, DomainError> {
        let text = match self {
            Self::Import => {
                let alias = self.alias(resource)?;
                let version = self.token("version", resource.version())?;
                self.repo(resource, project)?;
                format!(
                    "{alias} \"{package}/{version}\"",
                    package = resource.api_package(project)
                )
            }
            Self::ControllerImport => {
                let repo = self.repo_path(project)?;
                format!("\"{repo}/controllers\"")
            }
            Self::SchemeRegistration => {
                let alias = self.alias(resource)?;
                format!("_ = {alias}.AddToScheme(scheme)")
            }
            Self::ReconcilerWiring => {
                let kind = self.identifier("kind", resource.kind())?;
                format!(
                    "if err = (&controllers.{kind}Reconciler{{\n\
                     \tClient: mgr.GetClient(),\n\
                     \tLog:    ctrl.Log.WithName(\"controllers\").WithName(\"{kind}\"),\n\
                     }}).SetupWithManager(mgr); err != nil {{\n\
                     \tsetupLog.Error(err, \"unable to create controller\", \"controller\", \"{kind}\")\n\
                     \tos.Exit(1)\n\
                     }}"
                )
            }
            Self::WebhookWiring => {
                let alias = self.alias(resource)?;
                let kind = self.identifier("kind", resource.kind())?;
                format!(
                    "if err = (&{alias}.{kind}{{}}).SetupWebhookWithManager(mgr); err != nil {{\n\
                     \tsetupLog.Error(err, \"unable to create webhook\", \"webhook\", \"{kind}\")\n\
                     \tos.Exit(1)\n\
                     }}"
                )
            }
        };

        Fragment::new(text)
    }

    // -------------------------------------------------------------------------
    // Input checks
    // -------------------------------------------------------------------------

    fn fail(self, reason: String) -> DomainError {
        DomainError::Composition {
            fragment: self.as_str(),
            reason,
        }
    }

    /// A value safe to place inside a Go string literal or expression.
    fn token<'a>(self, field: &str, value: &'a str) -> Result<&'a str, DomainError> {
        if value.is_empty() {
            return Err(self.fail(format!("{field} is empty")));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '`' | '\\'))
        {
            return Err(self.fail(format!("{field} '{value}' contains {bad:?}")));
        }
        Ok(value)
    }

    /// A value that must be a Go identifier on its own.
    fn identifier<'a>(self, field: &str, value: &'a str) -> Result<&'a str, DomainError> {
        let value = self.token(field, value)?;
        let mut chars = value.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(self.fail(format!("{field} '{value}' is not a valid identifier")));
        }
        Ok(value)
    }

    /// `<group><version>` import alias.
    fn alias(self, resource: &Resource) -> Result<String, DomainError> {
        self.token("group", resource.group())?;
        self.token("version", resource.version())?;
        let alias = resource.import_alias();
        self.identifier("import alias", &alias)?;
        Ok(alias)
    }

    fn repo_path(self, project: &Project) -> Result<&str, DomainError> {
        let repo = self.token("repo", project.repo())?;
        if repo.ends_with('/') {
            return Err(self.fail(format!("repo '{repo}' ends with '/'")));
        }
        Ok(repo)
    }

    /// Core groups import from `k8s.io/api`, so the repo only matters for
    /// project groups.
    fn repo(self, resource: &Resource, project: &Project) -> Result<(), DomainError> {
        if !resource.is_core_group() {
            self.repo_path(project)?;
        }
        Ok(())
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Composition {
                fragment: "unknown",
                reason: format!("no fragment kind named '{s}'"),
            })
    }
}
