//! Format-specific error types.

use thiserror::Error;

/// Errors raised while resolving number formats or style names.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// A custom number format failed section-count or character validation.
    #[error("invalid Excel number format: {specifier:?}")]
    InvalidFormat { specifier: String },

    /// Unknown border style name.
    #[error("invalid border type: {0}")]
    InvalidBorderStyle(String),

    /// Unknown fill pattern name.
    #[error("invalid fill pattern: {0}")]
    InvalidFillPattern(String),

    /// Unknown underline style name.
    #[error("invalid underline style: {0}")]
    InvalidUnderline(String),

    /// Unknown horizontal or vertical alignment.
    #[error("invalid {axis} alignment: {value}")]
    InvalidAlignment { axis: &'static str, value: String },

    /// Text rotation outside -90..=90 degrees.
    #[error("invalid text rotation: {0} (expected -90 to 90)")]
    InvalidRotation(f64),

    /// Color that is not a 6-digit hexadecimal RGB value.
    #[error("invalid color: {0} (expected 6-digit hex RGB such as 'FF0000')")]
    InvalidColor(String),
}

impl FormatError {
    /// Create a new "invalid format" error.
    pub fn invalid_format(specifier: impl Into<String>) -> Self {
        Self::InvalidFormat {
            specifier: specifier.into(),
        }
    }

    /// Create a new "invalid alignment" error.
    pub fn invalid_alignment(axis: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAlignment {
            axis,
            value: value.into(),
        }
    }
}
