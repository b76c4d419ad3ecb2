//! Markwire Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the markwire
//! source augmentation tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          markwire-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (InsertService, WiringService)       │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: Filesystem)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    markwire-adapters (Infrastructure)   │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Marker, Fragment, splice, WireMode)   │
//! │         No I/O, no adapters             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use markwire_core::{
//!     application::{InsertService, WiringService},
//!     domain::{Project, Resource, WireMode},
//! };
//!
//! // 1. Describe what is being wired
//! let resource = Resource::new("ship", "v1beta1", "Frigate");
//! let project = Project::new("github.com/example/operator", "example.com");
//!
//! // 2. Use application service (with an injected filesystem adapter)
//! let service = WiringService::new(InsertService::new(filesystem));
//! service.wire("main.go", &resource, &project, WireMode::Controller).unwrap();
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InsertOutcome, InsertService, Rewrite, WiringService, ports::Filesystem,
    };
    pub use crate::domain::{
        Fragment, FragmentKind, InsertionRequest, Marker, MarkerSet, Placement, Project,
        Resource, ScaffoldMarker, WireMode,
    };
    pub use crate::error::{MarkwireError, MarkwireResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
