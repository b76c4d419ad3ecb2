//! Application layer for markwire.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (InsertService, WiringService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! splicing or composition logic itself. That lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    InsertOutcome, // DTO for a completed insertion
    InsertService,
    Rewrite,
    WiringService,
};

// Re-export port traits (for adapter implementation)
pub use ports::Filesystem;

pub use error::ApplicationError;
