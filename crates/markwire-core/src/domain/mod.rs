// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for markwire.
//!
//! This module contains pure logic with no I/O. Reading and replacing target
//! files is handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Content goes in as `&str`, comes out as `String`
//! - **Validated values**: `Marker` and `Fragment` reject bad input at
//!   construction
//! - **Closed shapes**: fragment kinds and wiring modes are enums
//!
// Public API - what the world sees
pub mod composer;
pub mod entities;
pub mod error;
pub mod splice;
pub mod value_objects;
pub mod wiring;

// Re-exports for convenience
pub use composer::FragmentKind;
pub use entities::{InsertionRequest, Project, Resource};
pub use error::{DomainError, ErrorCategory};
pub use splice::{MarkerHit, MarkerLocation, Splice, locate, splice};
pub use value_objects::{
    BUILDER_MARKER, Fragment, IMPORTS_MARKER, Marker, MarkerSet, Placement, SCHEME_MARKER,
    ScaffoldMarker,
};
pub use wiring::WireMode;
