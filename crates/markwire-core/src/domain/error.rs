// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid marker '{marker}': {reason}")]
    InvalidMarker { marker: String, reason: String },

    #[error("Fragment text cannot be empty")]
    EmptyFragment,

    /// Fragment inputs that would produce garbled output.
    #[error("Cannot compose {fragment} fragment: {reason}")]
    Composition {
        fragment: &'static str,
        reason: String,
    },

    #[error("Unknown placement '{0}' (expected 'above' or 'below')")]
    InvalidPlacement(String),

    #[error("Unknown wiring mode '{0}' (expected 'resource', 'controller' or 'webhook')")]
    InvalidWireMode(String),

    // ========================================================================
    // Target File Errors
    // ========================================================================
    #[error("Marker not found: {}", .markers.join(", "))]
    MarkerNotFound { markers: Vec<String> },

    #[error("Marker '{marker}' is not unique (found on lines {lines:?})")]
    DuplicateMarker { marker: String, lines: Vec<usize> },

    /// A fragment line would itself become a copy of a requested marker.
    #[error("Fragment contains the marker line '{marker}'")]
    MarkerInFragment { marker: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidMarker { reason, .. } => vec![
                format!("Marker rejected: {}", reason),
                "A marker is a single, non-empty line of text".into(),
            ],
            Self::Composition { fragment, reason } => vec![
                format!("The {} fragment could not be built: {}", fragment, reason),
                "Group, version and kind must be identifiers (letters, digits, '_')".into(),
                "Repository paths cannot contain spaces or quotes".into(),
            ],
            Self::MarkerNotFound { markers } => {
                let mut suggestions = vec!["The target file is missing these marker lines:".into()];
                suggestions.extend(markers.iter().map(|m| format!("  • {}", m)));
                suggestions.push("Restore the marker lines or regenerate the scaffold".into());
                suggestions
            }
            Self::DuplicateMarker { marker, .. } => vec![
                format!("'{}' must appear on exactly one line", marker),
                "Remove the extra copies before wiring again".into(),
            ],
            Self::MarkerInFragment { marker } => vec![
                format!("A fragment line reads exactly '{}'", marker),
                "Inserting it would duplicate the marker".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidMarker { .. }
            | Self::EmptyFragment
            | Self::Composition { .. }
            | Self::InvalidPlacement(_)
            | Self::InvalidWireMode(_)
            | Self::DuplicateMarker { .. }
            | Self::MarkerInFragment { .. } => ErrorCategory::Validation,
            Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
