//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource registration or reads.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The URI template could not be parsed.
    #[error("Invalid resource template: {0}")]
    InvalidTemplate(String),

    /// A resource with this template is already registered.
    #[error("Resource template already registered: {0}")]
    DuplicateTemplate(String),

    /// An internal error that indicates a programming bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Create a new "invalid template" error.
    pub fn invalid_template(msg: impl Into<String>) -> Self {
        Self::InvalidTemplate(msg.into())
    }

    /// Create a new "duplicate template" error.
    pub fn duplicate_template(template: impl Into<String>) -> Self {
        Self::DuplicateTemplate(template.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
