//! Common utilities shared across the spreadsheet tools.
//!
//! Result construction, workbook I/O through `umya-spreadsheet`, and A1-style
//! cell reference handling.

use std::path::{Path, PathBuf};

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::{debug, warn};
use umya_spreadsheet::helper::coordinate::{column_index_from_string, coordinate_from_index};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::core::config::Config;
use crate::core::security::{validate_new_path, validate_path};
use crate::domains::tools::ToolError;

/// Largest column index in an OOXML worksheet (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Largest row index in an OOXML worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(value) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(value),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&format!("failed to serialize result: {}", e)),
    }
}

/// Turn a tool outcome into a `CallToolResult`.
pub fn into_call_result<T: Serialize>(outcome: Result<(String, T), ToolError>) -> CallToolResult {
    match outcome {
        Ok((summary, data)) => structured_result(summary, &data),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Reject an empty required string argument.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "{} is required and must be a non-empty string",
            field
        )));
    }
    Ok(())
}

/// Longest worksheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel forbids in worksheet names.
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Check a worksheet name against the OOXML naming rules.
pub fn validate_sheet_name(name: &str) -> Result<(), ToolError> {
    require_non_empty(name, "sheet name")?;

    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(ToolError::invalid_arguments(format!(
            "sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(ToolError::invalid_arguments(format!(
            "sheet name '{}' contains invalid character '{}'",
            name, c
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ToolError::invalid_arguments(format!(
            "sheet name '{}' cannot start or end with an apostrophe",
            name
        )));
    }
    Ok(())
}

/// Validate an existing workbook path and open it.
pub fn open_workbook(filepath: &str, config: &Config) -> Result<(PathBuf, Spreadsheet), ToolError> {
    require_non_empty(filepath, "filepath")?;
    let path = validate_path(filepath, config)?;
    debug!(path = %path.display(), "Opening workbook");

    let book = umya_spreadsheet::reader::xlsx::read(&path)
        .map_err(|e| ToolError::OpenFailed(e.to_string()))?;
    Ok((path, book))
}

/// Validate the target of a workbook that is about to be created.
pub fn new_workbook_path(filepath: &str, config: &Config) -> Result<PathBuf, ToolError> {
    require_non_empty(filepath, "filepath")?;
    Ok(validate_new_path(filepath, config)?)
}

/// Write a workbook back to disk.
pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<(), ToolError> {
    debug!(path = %path.display(), "Saving workbook");
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| ToolError::SaveFailed(e.to_string()))
}

/// Borrow a worksheet by name.
pub fn sheet<'a>(book: &'a Spreadsheet, name: &str) -> Result<&'a Worksheet, ToolError> {
    book.get_sheet_by_name(name)
        .ok_or_else(|| ToolError::sheet_not_found(name))
}

/// Mutably borrow a worksheet by name.
pub fn sheet_mut<'a>(book: &'a mut Spreadsheet, name: &str) -> Result<&'a mut Worksheet, ToolError> {
    book.get_sheet_by_name_mut(name)
        .ok_or_else(|| ToolError::sheet_not_found(name))
}

/// Names of all worksheets, in workbook order.
pub fn sheet_names(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect()
}

/// A single cell position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub col: u32,
    pub row: u32,
}

impl CellRef {
    /// Parse an A1-style reference such as `B7` or `$AA$10`.
    ///
    /// The shape is checked here first; umya's own coordinate parser accepts
    /// malformed input.
    pub fn parse(reference: &str) -> Result<Self, ToolError> {
        let invalid = || ToolError::InvalidCell(reference.to_string());

        let trimmed = reference.trim();
        let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (letters, digits) = rest.split_at(split);
        let digits = digits.strip_prefix('$').unwrap_or(digits);

        if letters.is_empty()
            || letters.len() > 3
            || digits.is_empty()
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let col = column_index_from_string(letters);
        let row: u32 = digits.parse().map_err(|_| invalid())?;

        if col > MAX_COLUMNS || row == 0 || row > MAX_ROWS {
            return Err(invalid());
        }

        Ok(Self { col, row })
    }

    /// Shift the reference by whole rows and columns.
    pub fn offset(self, cols: u32, rows: u32) -> Result<Self, ToolError> {
        let col = self.col + cols;
        let row = self.row + rows;
        if col > MAX_COLUMNS || row > MAX_ROWS {
            return Err(ToolError::invalid_arguments(format!(
                "data starting at {} extends past the worksheet boundary",
                self
            )));
        }
        Ok(Self { col, row })
    }

    /// Position as the `(col, row)` tuple umya-spreadsheet takes.
    pub fn position(self) -> (u32, u32) {
        (self.col, self.row)
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&coordinate_from_index(&self.col, &self.row))
    }
}

/// Inclusive rectangle between two corner cells, normalized so that the
/// first corner is the top-left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub top_left: CellRef,
    pub bottom_right: CellRef,
}

impl CellRange {
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            top_left: CellRef {
                col: a.col.min(b.col),
                row: a.row.min(b.row),
            },
            bottom_right: CellRef {
                col: a.col.max(b.col),
                row: a.row.max(b.row),
            },
        }
    }

    /// Every cell position in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.top_left.row..=self.bottom_right.row).flat_map(move |row| {
            (self.top_left.col..=self.bottom_right.col).map(move |col| CellRef { col, row })
        })
    }

    pub fn cell_count(&self) -> u64 {
        let cols = u64::from(self.bottom_right.col - self.top_left.col + 1);
        let rows = u64::from(self.bottom_right.row - self.top_left.row + 1);
        cols * rows
    }

    pub fn is_single_cell(&self) -> bool {
        self.top_left == self.bottom_right
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.top_left, self.bottom_right)
    }
}
