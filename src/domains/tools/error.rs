//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool registration or execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateName(String),

    /// An upstream service the handler depends on failed.
    ///
    /// The message is handler-authored and user-visible; tools registered
    /// with `ErrorPolicy::ReportAsContent` surface it as a text content item.
    #[error("{0}")]
    Upstream(String),

    /// An internal error that indicates a programming bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "duplicate name" error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Create a new "upstream" error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
