//! Insert Service - the marker inserter.
//!
//! One invocation is one read-splice-replace cycle over a single file:
//! 1. Read the full target content through the `Filesystem` port
//! 2. Splice the request in memory
//! 3. Replace the file once, only if every marker matched
//!
//! A failed splice never reaches step 3, so the file is left untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{InsertionRequest, Marker, MarkerHit, MarkerLocation, Placement, locate, splice},
    error::MarkwireResult,
};

/// Summary of a completed insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    pub path: PathBuf,
    pub placement: Placement,
    pub markers: Vec<MarkerHit>,
    /// `false` when the request was empty and nothing was written.
    pub written: bool,
}

impl InsertOutcome {
    pub fn inserted_lines(&self) -> usize {
        self.markers.iter().map(|m| m.inserted).sum()
    }
}

/// A computed but uncommitted rewrite of a target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub path: PathBuf,
    pub placement: Placement,
    pub before: String,
    pub after: String,
    pub markers: Vec<MarkerHit>,
}

impl Rewrite {
    pub fn is_change(&self) -> bool {
        self.before != self.after
    }

    fn into_outcome(self, written: bool) -> InsertOutcome {
        InsertOutcome {
            path: self.path,
            placement: self.placement,
            markers: self.markers,
            written,
        }
    }
}

/// Inserts fragments next to markers in existing files.
pub struct InsertService {
    filesystem: Box<dyn Filesystem>,
    placement: Placement,
}

impl InsertService {
    /// Create a new insert service over the given filesystem adapter.
    ///
    /// Fragments go below their marker unless [`Self::with_placement`]
    /// says otherwise.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            placement: Placement::default(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Insert every fragment of `request` into the file at `path`.
    ///
    /// The file is replaced exactly once on success and not at all on
    /// failure. An empty request reads the file but writes nothing.
    #[instrument(
        skip_all,
        fields(
            path = %path.as_ref().display(),
            markers = request.len(),
            placement = %self.placement
        )
    )]
    pub fn insert(
        &self,
        path: impl AsRef<Path>,
        request: &InsertionRequest,
    ) -> MarkwireResult<InsertOutcome> {
        let rewrite = self.preview(path, request)?;

        if request.is_empty() {
            debug!("Empty insertion request, nothing to write");
            return Ok(rewrite.into_outcome(false));
        }

        self.filesystem.replace(&rewrite.path, &rewrite.after)?;

        info!(
            lines = rewrite.markers.iter().map(|m| m.inserted).sum::<usize>(),
            "Fragments inserted"
        );
        Ok(rewrite.into_outcome(true))
    }

    /// Compute the rewrite `insert` would perform, without writing.
    pub fn preview(
        &self,
        path: impl AsRef<Path>,
        request: &InsertionRequest,
    ) -> MarkwireResult<Rewrite> {
        let path = path.as_ref();
        let before = self.filesystem.read_to_string(path)?;
        debug!(bytes = before.len(), "Target read");

        let spliced = splice(&before, request, self.placement)
            .map_err(|e| ApplicationError::at_path(path, e))?;

        Ok(Rewrite {
            path: path.to_path_buf(),
            placement: self.placement,
            before,
            after: spliced.content,
            markers: spliced.hits,
        })
    }

    /// Report where each marker occurs in the file at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn locate(
        &self,
        path: impl AsRef<Path>,
        markers: &[Marker],
    ) -> MarkwireResult<Vec<MarkerLocation>> {
        let content = self.filesystem.read_to_string(path.as_ref())?;
        Ok(locate(&content, markers))
    }
}
