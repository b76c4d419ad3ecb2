//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use markwire_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{MarkwireError, MarkwireResult},
};
use tracing::debug;

/// Production filesystem implementation using `std::fs`.
///
/// `replace` writes to a sibling temp file and renames it over the target,
/// so readers see either the old content or the new content.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> MarkwireResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn replace(&self, path: &Path, content: &str) -> MarkwireResult<()> {
        let permissions = fs::metadata(path)
            .map_err(|e| map_io_error(path, e, "get metadata"))?
            .permissions();

        let temp_path = temp_path_for(path);
        debug!(temp = %temp_path.display(), "Writing replacement");

        let written = write_temp(&temp_path, content.as_bytes())
            .and_then(|()| fs::set_permissions(&temp_path, permissions))
            .map_err(|e| map_io_error(&temp_path, e, "write temporary file"))
            .and_then(|()| {
                fs::rename(&temp_path, path).map_err(|e| map_io_error(path, e, "replace file"))
            });

        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Temp file in the same directory as `path`, so the rename stays on one
/// filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = format!(
        ".{}.{}.markwire.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(name)
}

fn write_temp(temp_path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)?;
    file.write_all(content)?;
    file.sync_all()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> MarkwireError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
