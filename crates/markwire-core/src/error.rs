//! Unified error handling for Markwire Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Markwire Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// markwire-core, providing a unified interface for error handling.
/// Every variant is fatal to the invocation that produced it.
#[derive(Debug, Error, Clone)]
pub enum MarkwireError {
    /// Errors from the domain layer (invalid markers, composition failures).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (missing markers, I/O failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl MarkwireError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when a requested marker was absent from the target file.
    pub fn is_marker_not_found(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::MarkerNotFound { .. })
                | Self::Domain(DomainError::MarkerNotFound { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MarkwireResult<T> = Result<T, MarkwireError>;
