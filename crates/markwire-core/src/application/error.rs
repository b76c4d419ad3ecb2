//! Application layer errors.
//!
//! These errors represent failures in orchestration against a concrete
//! target file. Pure logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::{ErrorCategory, MarkwireError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// One or more requested markers have no line in the target file.
    #[error("Marker not found in {path}: {}", .markers.join(", "))]
    MarkerNotFound { path: PathBuf, markers: Vec<String> },

    /// A requested marker occurs on more than one line.
    #[error("Marker '{marker}' occurs more than once in {path} (lines {lines:?})")]
    DuplicateMarker {
        path: PathBuf,
        marker: String,
        lines: Vec<usize>,
    },

    /// Reading or replacing a file failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("Filesystem lock poisoned")]
    LockPoisoned,

    /// A project description file could not be parsed.
    #[error("Invalid project file {path}: {reason}")]
    InvalidProjectFile { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Attach the target path to a splice failure.
    ///
    /// Marker errors become path-aware application errors; anything else
    /// stays a domain error.
    pub fn at_path(path: impl Into<PathBuf>, err: DomainError) -> MarkwireError {
        match err {
            DomainError::MarkerNotFound { markers } => Self::MarkerNotFound {
                path: path.into(),
                markers,
            }
            .into(),
            DomainError::DuplicateMarker { marker, lines } => Self::DuplicateMarker {
                path: path.into(),
                marker,
                lines,
            }
            .into(),
            other => other.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MarkerNotFound { path, markers } => {
                let mut suggestions = vec![format!(
                    "{} is missing these marker lines:",
                    path.display()
                )];
                suggestions.extend(markers.iter().map(|m| format!("  • {}", m)));
                suggestions.push("The file was not modified".into());
                suggestions.push("Try: markwire check to list the markers the file has".into());
                suggestions
            }
            Self::DuplicateMarker { marker, lines, .. } => vec![
                format!("'{}' appears on lines {:?}", marker, lines),
                "Each marker must appear on exactly one line".into(),
                "The file was not modified".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the file exists and you have write permissions".into(),
            ],
            Self::InvalidProjectFile { path, .. } => vec![
                format!("Could not read project settings from {}", path.display()),
                "Pass --repo and --domain explicitly instead".into(),
            ],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateMarker { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::InvalidProjectFile { .. } => ErrorCategory::Configuration,
        }
    }
}
