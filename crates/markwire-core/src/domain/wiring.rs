//! Wiring modes: which fragments a `main.go` update inserts, and where.
//!
//! | Mode | Markers touched | Fragments (in order) |
//! |------|-----------------|----------------------|
//! | resource | imports, scheme | api import; scheme registration |
//! | controller | imports, scheme, builder | api import, controller import; scheme registration; reconciler wiring |
//! | webhook | imports, scheme, builder | api import, controller import; scheme registration; webhook wiring |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    composer::FragmentKind,
    entities::{InsertionRequest, Project, Resource},
    error::DomainError,
    value_objects::MarkerSet,
};

/// What a single update wires into the scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    /// API types only: import and scheme registration.
    Resource,
    /// API types plus a reconciler.
    Controller,
    /// API types plus a webhook.
    Webhook,
}

impl WireMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Controller => "controller",
            Self::Webhook => "webhook",
        }
    }

    /// Fragments this mode inserts, in insertion order.
    pub const fn fragment_kinds(&self) -> &'static [FragmentKind] {
        match self {
            Self::Resource => &[FragmentKind::Import, FragmentKind::SchemeRegistration],
            Self::Controller => &[
                FragmentKind::Import,
                FragmentKind::ControllerImport,
                FragmentKind::SchemeRegistration,
                FragmentKind::ReconcilerWiring,
            ],
            Self::Webhook => &[
                FragmentKind::Import,
                FragmentKind::ControllerImport,
                FragmentKind::SchemeRegistration,
                FragmentKind::WebhookWiring,
            ],
        }
    }

    /// Compose every fragment of this mode and map it to its marker.
    pub fn plan(
        self,
        resource: &Resource,
        project: &Project,
        markers: &MarkerSet,
    ) -> Result<InsertionRequest, DomainError> {
        let mut request = InsertionRequest::new();
        for kind in self.fragment_kinds() {
            let fragment = kind.compose(resource, project)?;
            request.push(markers.get(kind.target()).clone(), fragment);
        }
        Ok(request)
    }
}

impl fmt::Display for WireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "resource" | "api" => Ok(Self::Resource),
            "controller" => Ok(Self::Controller),
            "webhook" => Ok(Self::Webhook),
            other => Err(DomainError::InvalidWireMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{BUILDER_MARKER, IMPORTS_MARKER, Marker, SCHEME_MARKER};

    fn plan(mode: WireMode) -> InsertionRequest {
        mode.plan(
            &Resource::new("ship", "v1beta1", "Frigate"),
            &Project::new("github.com/example/operator", "example.com"),
            &MarkerSet::kubebuilder(),
        )
        .unwrap()
    }

    fn texts(req: &InsertionRequest, marker: &str) -> Vec<String> {
        req.fragments(&Marker::new(marker).unwrap())
            .map(|f| f.iter().map(|f| f.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn resource_mode_touches_imports_and_scheme() {
        let req = plan(WireMode::Resource);
        assert_eq!(req.len(), 2);
        assert_eq!(texts(&req, IMPORTS_MARKER).len(), 1);
        assert_eq!(texts(&req, SCHEME_MARKER).len(), 1);
        assert!(texts(&req, BUILDER_MARKER).is_empty());
    }

    #[test]
    fn controller_mode_imports_api_then_controllers() {
        let req = plan(WireMode::Controller);
        let imports = texts(&req, IMPORTS_MARKER);
        assert_eq!(imports.len(), 2);
        assert!(imports[0].starts_with("shipv1beta1 "));
        assert!(imports[1].ends_with("/controllers\""));

        let builder = texts(&req, BUILDER_MARKER);
        assert!(builder[0].contains("FrigateReconciler"));
    }

    #[test]
    fn webhook_mode_wires_webhook_not_reconciler() {
        let req = plan(WireMode::Webhook);
        let builder = texts(&req, BUILDER_MARKER);
        assert_eq!(builder.len(), 1);
        assert!(builder[0].contains("SetupWebhookWithManager"));
        assert!(!builder[0].contains("Reconciler"));
    }

    #[test]
    fn custom_marker_set_is_honoured() {
        let markers = MarkerSet::from_texts("// @imports", "// @scheme", "// @builder").unwrap();
        let req = WireMode::Resource
            .plan(
                &Resource::new("ship", "v1", "Frigate"),
                &Project::new("example.org/op", ""),
                &markers,
            )
            .unwrap();
        assert!(req.fragments(&Marker::new("// @imports").unwrap()).is_some());
    }

    #[test]
    fn invalid_inputs_fail_the_whole_plan() {
        let err = WireMode::Controller
            .plan(
                &Resource::new("ship", "v1", "Frig ate"),
                &Project::new("example.org/op", ""),
                &MarkerSet::kubebuilder(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Composition { .. }));
    }

    #[test]
    fn mode_parses() {
        assert_eq!("Webhook".parse::<WireMode>().unwrap(), WireMode::Webhook);
        assert!("both".parse::<WireMode>().is_err());
    }
}
