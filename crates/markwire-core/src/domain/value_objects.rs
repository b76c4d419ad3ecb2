//! Domain value objects: Marker, Fragment, Placement, ScaffoldMarker, MarkerSet.
//!
//! # Design
//!
//! These are pure value types with equality by value and no identity. Constructors
//! enforce the invariants (a marker is one non-empty line, a fragment is not
//! empty) so the splice algorithm never has to re-check them.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Import marker emitted by the kubebuilder v2 `main.go` scaffold.
pub const IMPORTS_MARKER: &str = "// +kubebuilder:scaffold:imports";
/// Scheme registration marker emitted by the kubebuilder v2 `main.go` scaffold.
pub const SCHEME_MARKER: &str = "// +kubebuilder:scaffold:scheme";
/// Manager setup marker emitted by the kubebuilder v2 `main.go` scaffold.
pub const BUILDER_MARKER: &str = "// +kubebuilder:scaffold:builder";

// ── Marker ───────────────────────────────────────────────────────────────────

/// An anchor line inside a target file.
///
/// The text is stored trimmed. A file line matches when its own trimmed text
/// equals the marker exactly, so indented marker lines are found while
/// substrings never are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Marker(String);

impl Marker {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidMarker {
                marker: text,
                reason: "marker text is empty".into(),
            });
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(DomainError::InvalidMarker {
                marker: text.clone(),
                reason: "marker must be a single line".into(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `line` is this marker's anchor line.
    pub fn matches(&self, line: &str) -> bool {
        line.trim() == self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Marker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets a `BTreeMap<Marker, _>` be queried with a trimmed line.
impl Borrow<str> for Marker {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Marker {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Marker {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        marker.0
    }
}

// ── Fragment ─────────────────────────────────────────────────────────────────

/// A literal block of text inserted next to a marker.
///
/// Multi-line fragments are emitted as several lines; a trailing line
/// terminator does not produce an extra blank line. Indentation is kept
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fragment(String);

impl Fragment {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.is_empty() {
            return Err(DomainError::EmptyFragment);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lines this fragment occupies once inserted.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fragment {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fragment> for String {
    fn from(fragment: Fragment) -> Self {
        fragment.0
    }
}

// ── Placement ────────────────────────────────────────────────────────────────

/// Where fragments land relative to their marker line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Directly after the marker line. Each call's fragments sit closest to
    /// the marker.
    #[default]
    Below,
    /// Directly before the marker line. Successive calls accumulate in
    /// chronological order and the marker stays last.
    Above,
}

impl Placement {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Above => "above",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "below" | "after" => Ok(Self::Below),
            "above" | "before" => Ok(Self::Above),
            other => Err(DomainError::InvalidPlacement(other.to_string())),
        }
    }
}

// ── ScaffoldMarker ───────────────────────────────────────────────────────────

/// The three insertion points of a generated `main.go`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaffoldMarker {
    /// End of the import block.
    Imports,
    /// End of `init()`, where API types join the runtime scheme.
    Scheme,
    /// After the manager is built, where reconcilers and webhooks are set up.
    Builder,
}

impl ScaffoldMarker {
    pub const ALL: [ScaffoldMarker; 3] = [Self::Imports, Self::Scheme, Self::Builder];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Imports => "imports",
            Self::Scheme => "scheme",
            Self::Builder => "builder",
        }
    }

    pub const fn default_text(&self) -> &'static str {
        match self {
            Self::Imports => IMPORTS_MARKER,
            Self::Scheme => SCHEME_MARKER,
            Self::Builder => BUILDER_MARKER,
        }
    }
}

impl fmt::Display for ScaffoldMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MarkerSet ────────────────────────────────────────────────────────────────

/// Concrete marker text for each [`ScaffoldMarker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    imports: Marker,
    scheme: Marker,
    builder: Marker,
}

impl MarkerSet {
    pub fn new(imports: Marker, scheme: Marker, builder: Marker) -> Self {
        Self {
            imports,
            scheme,
            builder,
        }
    }

    /// Build a set from raw text, validating each marker.
    pub fn from_texts(
        imports: impl Into<String>,
        scheme: impl Into<String>,
        builder: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(
            Marker::new(imports)?,
            Marker::new(scheme)?,
            Marker::new(builder)?,
        ))
    }

    /// The markers written by the kubebuilder v2 scaffold.
    pub fn kubebuilder() -> Self {
        Self {
            imports: Marker(IMPORTS_MARKER.to_string()),
            scheme: Marker(SCHEME_MARKER.to_string()),
            builder: Marker(BUILDER_MARKER.to_string()),
        }
    }

    pub fn get(&self, which: ScaffoldMarker) -> &Marker {
        match which {
            ScaffoldMarker::Imports => &self.imports,
            ScaffoldMarker::Scheme => &self.scheme,
            ScaffoldMarker::Builder => &self.builder,
        }
    }

    /// All markers in scaffold order (imports, scheme, builder).
    pub fn iter(&self) -> impl Iterator<Item = (ScaffoldMarker, &Marker)> {
        ScaffoldMarker::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::kubebuilder()
    }
}
