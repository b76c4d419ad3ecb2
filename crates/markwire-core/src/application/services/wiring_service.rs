//! Wiring Service - updates a generated `main.go` for a new resource.
//!
//! Plans the fragments for one [`WireMode`] and hands them to the
//! [`InsertService`] as a single request, so each update is one rewrite.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::services::insert_service::{InsertOutcome, InsertService, Rewrite},
    domain::{InsertionRequest, MarkerSet, Project, Resource, WireMode},
    error::MarkwireResult,
};

/// Wires resources, controllers and webhooks into a scaffolded entry point.
pub struct WiringService {
    inserter: InsertService,
    markers: MarkerSet,
}

impl WiringService {
    /// Create a wiring service using the kubebuilder marker set.
    pub fn new(inserter: InsertService) -> Self {
        Self {
            inserter,
            markers: MarkerSet::default(),
        }
    }

    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Compose the insertion request for `mode` without touching any file.
    pub fn plan(
        &self,
        resource: &Resource,
        project: &Project,
        mode: WireMode,
    ) -> MarkwireResult<InsertionRequest> {
        Ok(mode.plan(resource, project, &self.markers)?)
    }

    /// Wire `resource` into the file at `path`.
    ///
    /// Calling this twice for the same resource inserts everything twice;
    /// callers track what they have already wired.
    #[instrument(
        skip_all,
        fields(
            path = %path.as_ref().display(),
            resource = %resource,
            mode = %mode
        )
    )]
    pub fn wire(
        &self,
        path: impl AsRef<Path>,
        resource: &Resource,
        project: &Project,
        mode: WireMode,
    ) -> MarkwireResult<InsertOutcome> {
        let request = self.plan(resource, project, mode)?;
        let outcome = self.inserter.insert(path, &request)?;
        info!(kind = resource.kind(), "Resource wired");
        Ok(outcome)
    }

    /// Compute the rewrite `wire` would perform, without writing.
    pub fn preview(
        &self,
        path: impl AsRef<Path>,
        resource: &Resource,
        project: &Project,
        mode: WireMode,
    ) -> MarkwireResult<Rewrite> {
        let request = self.plan(resource, project, mode)?;
        self.inserter.preview(path, &request)
    }
}
