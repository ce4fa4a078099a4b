//! Per-workbook custom format allocation.
//!
//! [`resolve`](super::number::resolve) gives every unrecognized custom format
//! the same placeholder code. A [`CustomFormatRegistry`] instead hands out one
//! code per distinct format string, starting at
//! [`FormatCode::CUSTOM_ALLOCATION_START`]. The caller owns the registry and
//! scopes it to one workbook-editing session.

use std::collections::HashMap;

use super::error::FormatError;
use super::number::{FormatCode, FormatOrigin, ResolvedFormat, resolve_format};

/// Mapping from custom format strings to allocated codes.
#[derive(Debug, Clone)]
pub struct CustomFormatRegistry {
    next: u32,
    codes: HashMap<String, FormatCode>,
}

impl Default for CustomFormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomFormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            next: FormatCode::CUSTOM_ALLOCATION_START.get(),
            codes: HashMap::new(),
        }
    }

    /// Return the code for `format`, allocating the next free one if needed.
    pub fn allocate(&mut self, format: &str) -> FormatCode {
        if let Some(code) = self.codes.get(format) {
            return *code;
        }

        let code = FormatCode::new(self.next);
        self.next += 1;
        self.codes.insert(format.to_string(), code);
        code
    }
}

/// Resolve a specifier, allocating distinct codes for generic custom formats.
///
/// Built-in and common custom formats resolve exactly as in
/// [`resolve_format`]; the registry is only consulted for the rest.
pub fn resolve_with(
    registry: &mut CustomFormatRegistry,
    specifier: &str,
) -> Result<ResolvedFormat, FormatError> {
    let mut resolved = resolve_format(specifier)?;
    if resolved.origin == FormatOrigin::Custom {
        resolved.code = registry.allocate(&resolved.format_code);
    }
    Ok(resolved)
}
