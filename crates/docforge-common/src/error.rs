//! Common error types used throughout docforge.
//!
//! This module provides a unified error type that covers the failure cases
//! outside a single conversion: missing inputs, rejected input files, invalid
//! settings, missing external tools, and I/O failures.

/// Common error type for docforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested file or job was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A setting or argument was out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An input file was rejected before submission (wrong type, unreadable).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required external tool is not installed.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new ToolNotFound error.
    pub fn tool_not_found<S: Into<String>>(name: S) -> Self {
        Self::ToolNotFound(name.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
