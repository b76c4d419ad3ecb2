//! Resource and project descriptions used to fill fragment templates.
//!
//! Both are opaque strings supplied by the caller; the fragment composer
//! decides whether they can be substituted safely.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kubernetes API groups whose types live in `k8s.io/api/<group>` rather
/// than in the project's own `api` package, with the domain each belongs to.
const CORE_GROUPS: &[(&str, &str)] = &[
    ("admission", "k8s.io"),
    ("admissionregistration", "k8s.io"),
    ("apiextensions", "k8s.io"),
    ("apps", ""),
    ("auditregistration", "k8s.io"),
    ("authentication", "k8s.io"),
    ("authorization", "k8s.io"),
    ("autoscaling", ""),
    ("batch", ""),
    ("certificates", "k8s.io"),
    ("coordination", "k8s.io"),
    ("core", ""),
    ("events", "k8s.io"),
    ("extensions", ""),
    ("imagepolicy", "k8s.io"),
    ("metrics", "k8s.io"),
    ("networking", "k8s.io"),
    ("node", "k8s.io"),
    ("policy", ""),
    ("rbac.authorization", "k8s.io"),
    ("scheduling", "k8s.io"),
    ("setting", "k8s.io"),
    ("storage", "k8s.io"),
];

fn core_group_domain(group: &str) -> Option<&'static str> {
    CORE_GROUPS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, domain)| *domain)
}

fn qualify(group: &str, domain: &str) -> String {
    if domain.is_empty() {
        group.to_string()
    } else {
        format!("{group}.{domain}")
    }
}

/// An API resource: group, version and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    group: String,
    version: String,
    kind: String,
}

impl Resource {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Package alias used by generated imports: `<group><version>`.
    pub fn import_alias(&self) -> String {
        format!("{}{}", self.group, self.version)
    }

    /// Whether this resource belongs to a built-in Kubernetes API group.
    pub fn is_core_group(&self) -> bool {
        core_group_domain(&self.group).is_some()
    }

    /// Go package holding the versioned API types, without the version
    /// segment.
    pub fn api_package(&self, project: &Project) -> String {
        if self.is_core_group() {
            format!("k8s.io/api/{}", self.group)
        } else {
            format!("{}/api", project.repo())
        }
    }

    /// Fully qualified group, e.g. `ship.example.com`.
    pub fn group_domain(&self, project: &Project) -> String {
        match core_group_domain(&self.group) {
            Some(domain) => qualify(&self.group, domain),
            None => qualify(&self.group, project.domain()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// The project being augmented: its Go module path and API domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    repo: String,
    domain: String,
}

impl Project {
    pub fn new(repo: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            domain: domain.into(),
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}
