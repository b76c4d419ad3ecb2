//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `markwire-adapters` crate provides implementations.

use crate::error::MarkwireResult;
use std::path::Path;

/// Port for reading and replacing target files.
///
/// Implemented by:
/// - `markwire_adapters::filesystem::LocalFilesystem` (production)
/// - `markwire_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Target files are always rewritten whole; there is no partial write
/// - `replace` must leave either the old or the new content on disk, never a
///   mix of both
pub trait Filesystem: Send + Sync {
    /// Read the full content of a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> MarkwireResult<String>;

    /// Replace the full content of a file.
    fn replace(&self, path: &Path, content: &str) -> MarkwireResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
