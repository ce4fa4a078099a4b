//! Tool-specific error types.

use thiserror::Error;

use crate::core::security::PathSecurityError;
use crate::domains::formats::FormatError;

/// Errors that can occur during tool operations.
///
/// The `Display` text of each variant is what the client sees in the
/// error result, so messages are phrased for end users.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("{0}")]
    InvalidArguments(String),

    /// The workbook path was rejected by the security layer.
    #[error("Path security validation failed: {0}")]
    Path(#[from] PathSecurityError),

    /// The workbook could not be read.
    #[error("failed to open Excel file: {0}")]
    OpenFailed(String),

    /// The workbook could not be written.
    #[error("failed to save workbook: {0}")]
    SaveFailed(String),

    /// The named worksheet does not exist.
    #[error("worksheet '{0}' not found")]
    SheetNotFound(String),

    /// A worksheet with that name already exists.
    #[error("worksheet '{0}' already exists")]
    SheetExists(String),

    /// A cell reference could not be parsed.
    #[error("invalid cell reference: {0}")]
    InvalidCell(String),

    /// A style or number format name was rejected.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The tool execution failed.
    #[error("{0}")]
    ExecutionFailed(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "sheet not found" error.
    pub fn sheet_not_found(name: impl Into<String>) -> Self {
        Self::SheetNotFound(name.into())
    }

    /// Create a new "sheet exists" error.
    pub fn sheet_exists(name: impl Into<String>) -> Self {
        Self::SheetExists(name.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
