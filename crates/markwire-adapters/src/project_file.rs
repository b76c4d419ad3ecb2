//! Reader for the scaffold's `PROJECT` file.
//!
//! The file is YAML written once by the scaffold's init step:
//!
//! ```yaml
//! version: "2"
//! domain: example.com
//! repo: github.com/example/operator
//! resources:
//! - group: ship
//!   version: v1beta1
//!   kind: Frigate
//! ```
//!
//! It is only ever read here.

use std::path::Path;

use markwire_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Project, Resource},
    error::MarkwireResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default file name, relative to the project root.
pub const PROJECT_FILE: &str = "PROJECT";

/// Parsed `PROJECT` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceEntry>,
}

/// One resource recorded in the `PROJECT` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl ProjectFile {
    /// Read and parse the file at `path` through `filesystem`.
    pub fn load(filesystem: &dyn Filesystem, path: &Path) -> MarkwireResult<Self> {
        let raw = filesystem.read_to_string(path)?;
        let parsed = Self::parse(&raw).map_err(|reason| ApplicationError::InvalidProjectFile {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(
            path = %path.display(),
            resources = parsed.resources.len(),
            "Project file loaded"
        );
        Ok(parsed)
    }

    /// Parse YAML text.
    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_yaml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Project attributes used by fragment composition.
    pub fn project(&self) -> Project {
        Project::new(self.repo.clone(), self.domain.clone())
    }

    /// Resources already recorded for this project.
    pub fn resources(&self) -> impl Iterator<Item = Resource> + '_ {
        self.resources
            .iter()
            .map(|r| Resource::new(r.group.clone(), r.version.clone(), r.kind.clone()))
    }

    /// Whether `resource` is already recorded.
    pub fn has_resource(&self, resource: &Resource) -> bool {
        self.resources().any(|r| r == *resource)
    }
}
