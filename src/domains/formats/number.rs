//! Number format code resolution.
//!
//! A specifier is resolved in three tiers:
//!
//! 1. **Built-in formats** (codes 0-163), matched case-insensitively.
//! 2. **Common custom formats** (codes 164-180), matched exactly. Custom
//!    format syntax is case-sensitive (`AM/PM`, `[Red]`), so no folding here.
//! 3. **Generic custom formats**, accepted when they pass [`is_valid_custom_format`]
//!    and assigned [`FormatCode::CUSTOM_ALLOCATION_START`].
//!
//! Both tables are fixed for the lifetime of the process; the mapping from
//! names to codes is part of the tool contract and must not change.

use schemars::JsonSchema;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use super::error::FormatError;

// ============================================================================
// Format Codes
// ============================================================================

/// Numeric identifier of a number format within a workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct FormatCode(u32);

impl FormatCode {
    /// The `General` format.
    pub const GENERAL: Self = Self(0);

    /// First code available to custom formats.
    pub const FIRST_CUSTOM: Self = Self(164);

    /// Code handed to every valid custom format missing from the fixed tables.
    pub const CUSTOM_ALLOCATION_START: Self = Self(181);

    /// Wrap a raw code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this code falls in the reserved built-in range.
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_CUSTOM.0
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which tier produced a resolved format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormatOrigin {
    BuiltIn,
    CommonCustom,
    Custom,
}

/// A resolved number format: its code plus the format text to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResolvedFormat {
    pub code: FormatCode,
    /// Format code text as written into the workbook (e.g. `0.00%`).
    pub format_code: String,
    pub origin: FormatOrigin,
}

// ============================================================================
// Tables
// ============================================================================

/// Entry of the built-in format table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuiltinFormat {
    pub code: u32,
    /// Canonical format text. Its lowercase form is the lookup key.
    pub format_code: &'static str,
}

/// Entry of the common custom format table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommonCustomFormat {
    pub code: u32,
    pub format_code: &'static str,
}

const fn builtin(code: u32, format_code: &'static str) -> BuiltinFormat {
    BuiltinFormat { code, format_code }
}

const fn custom(code: u32, format_code: &'static str) -> CommonCustomFormat {
    CommonCustomFormat { code, format_code }
}

/// Standard numeric, date, time and currency formats.
pub static BUILTIN_FORMATS: &[BuiltinFormat] = &[
    // Number
    builtin(0, "General"),
    builtin(1, "0"),
    builtin(2, "0.00"),
    builtin(3, "#,##0"),
    builtin(4, "#,##0.00"),
    builtin(9, "0%"),
    builtin(10, "0.00%"),
    builtin(11, "0.00E+00"),
    builtin(12, "# ?/?"),
    builtin(13, "# ??/??"),
    // Date and time
    builtin(14, "mm-dd-yy"),
    builtin(15, "d-mmm-yy"),
    builtin(16, "d-mmm"),
    builtin(17, "mmm-yy"),
    builtin(18, "h:mm AM/PM"),
    builtin(19, "h:mm:ss AM/PM"),
    builtin(20, "h:mm"),
    builtin(21, "h:mm:ss"),
    builtin(22, "m/d/yy h:mm"),
    // Currency, negatives in parentheses
    builtin(7, "$#,##0_);($#,##0)"),
    builtin(8, "$#,##0_);[Red]($#,##0)"),
    builtin(39, "$#,##0.00_);($#,##0.00)"),
    builtin(40, "$#,##0.00_);[Red]($#,##0.00)"),
];

/// Frequently used custom patterns with pre-assigned codes.
pub static COMMON_CUSTOM_FORMATS: &[CommonCustomFormat] = &[
    // Numbers
    custom(164, "#,##0_);(#,##0)"),
    custom(165, "#,##0.00_);(#,##0.00)"),
    custom(166, "[Blue]#,##0_);[Red](#,##0)"),
    custom(167, "[Blue]#,##0.00_);[Red](#,##0.00)"),
    // Dates
    custom(168, "yyyy-mm-dd"),
    custom(169, "dd/mm/yyyy"),
    custom(170, "mm/dd/yyyy"),
    custom(171, "dd-mmm-yyyy"),
    custom(172, "dd-mmm-yy"),
    custom(173, "mmm-yy"),
    // Times
    custom(174, "[h]:mm"),
    custom(175, "[h]:mm:ss"),
    custom(176, "hh:mm:ss"),
    custom(177, "hh:mm:ss.000"),
    // Currency
    custom(178, "\"$\"#,##0_);\"$\"(#,##0)"),
    custom(179, "\"$\"#,##0.00_);\"$\"(#,##0.00)"),
    // Accounting
    custom(180, "_(\"$\"* #,##0_);_(\"$\"* (#,##0);_(\"$\"* \"-\"_);_(@_)"),
];

static BUILTIN_BY_KEY: LazyLock<HashMap<String, &'static BuiltinFormat>> = LazyLock::new(|| {
    BUILTIN_FORMATS
        .iter()
        .map(|f| (f.format_code.to_lowercase(), f))
        .collect()
});

static COMMON_CUSTOM_BY_PATTERN: LazyLock<HashMap<&'static str, &'static CommonCustomFormat>> =
    LazyLock::new(|| {
        COMMON_CUSTOM_FORMATS
            .iter()
            .map(|f| (f.format_code, f))
            .collect()
    });

/// Maximum number of `;`-separated sections (positive; negative; zero; text).
pub const MAX_SECTIONS: usize = 4;

/// Punctuation accepted in a generic custom format, besides ASCII letters and digits.
const ALLOWED_PUNCTUATION: &str = ".,#?/\\*_()[]\"$-+ :";

static ALLOWED_CHARS: LazyLock<HashSet<char>> = LazyLock::new(|| {
    ('0'..='9')
        .chain('a'..='z')
        .chain('A'..='Z')
        .chain(ALLOWED_PUNCTUATION.chars())
        .collect()
});

// ============================================================================
// Resolution
// ============================================================================

/// Resolve a format specifier to its code.
///
/// Every valid custom format that is not in the fixed tables resolves to
/// [`FormatCode::CUSTOM_ALLOCATION_START`]; distinct custom formats share that
/// code. Use [`super::registry::resolve_with`] for distinct codes.
pub fn resolve(specifier: &str) -> Result<FormatCode, FormatError> {
    resolve_format(specifier).map(|resolved| resolved.code)
}

/// Resolve a format specifier to its code and the format text to store.
pub fn resolve_format(specifier: &str) -> Result<ResolvedFormat, FormatError> {
    if let Some(format) = lookup_builtin(specifier) {
        return Ok(ResolvedFormat {
            code: FormatCode(format.code),
            format_code: format.format_code.to_string(),
            origin: FormatOrigin::BuiltIn,
        });
    }

    if let Some(format) = lookup_common_custom(specifier) {
        return Ok(ResolvedFormat {
            code: FormatCode(format.code),
            format_code: format.format_code.to_string(),
            origin: FormatOrigin::CommonCustom,
        });
    }

    if !is_valid_custom_format(specifier) {
        return Err(FormatError::invalid_format(specifier));
    }

    Ok(ResolvedFormat {
        code: FormatCode::CUSTOM_ALLOCATION_START,
        format_code: specifier.to_string(),
        origin: FormatOrigin::Custom,
    })
}

/// Case-insensitive lookup in the built-in table.
pub fn lookup_builtin(specifier: &str) -> Option<&'static BuiltinFormat> {
    BUILTIN_BY_KEY.get(&specifier.to_lowercase()).copied()
}

/// Exact lookup in the common custom table.
pub fn lookup_common_custom(specifier: &str) -> Option<&'static CommonCustomFormat> {
    COMMON_CUSTOM_BY_PATTERN.get(specifier).copied()
}

/// Basic structural check of a custom number format.
///
/// Rejects empty strings, more than [`MAX_SECTIONS`] sections, and any
/// character outside the allow-set.
pub fn is_valid_custom_format(format: &str) -> bool {
    if format.is_empty() {
        return false;
    }

    if format.split(';').count() > MAX_SECTIONS {
        return false;
    }

    format
        .split(';')
        .all(|section| section.chars().all(|ch| ALLOWED_CHARS.contains(&ch)))
}
