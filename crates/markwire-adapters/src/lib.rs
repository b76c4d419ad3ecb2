//! Infrastructure adapters for Markwire.
//!
//! This crate implements the ports defined in `markwire-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod project_file;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_file::{PROJECT_FILE, ProjectFile, ResourceEntry};
