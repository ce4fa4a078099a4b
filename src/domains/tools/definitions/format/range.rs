//! Format range tool definition.
//!
//! Builds one cell style from the requested font, fill, border, alignment,
//! number format and protection options, then applies it to every cell of a
//! rectangular range. The range can optionally be merged afterwards.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use umya_spreadsheet::structs::PatternValues;
use umya_spreadsheet::{Border, Style};

use crate::core::config::Config;
use crate::domains::formats::style::{
    argb_color, border_style, fill_pattern, horizontal_alignment, text_rotation, underline_style,
    vertical_alignment,
};
use crate::domains::formats::{CustomFormatRegistry, ResolvedFormat, resolve_with};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    CellRange, CellRef, into_call_result, open_workbook, require_non_empty, save_workbook,
    sheet_mut,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the format range tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FormatRangeParams {
    /// Absolute or relative path to the Excel (.xlsx) file.
    pub filepath: String,

    /// Name of the worksheet where formatting should be applied.
    pub sheet_name: String,

    /// Top-left cell of the target range in A1 notation (e.g. 'A1').
    pub start_cell: String,

    /// Bottom-right cell of the target range. Defaults to `start_cell`.
    #[serde(default)]
    pub end_cell: Option<String>,

    /// Make cell text bold.
    #[serde(default)]
    pub bold: Option<bool>,

    /// Make cell text italic.
    #[serde(default)]
    pub italic: Option<bool>,

    /// Underline style: none, single, double, singleAccounting, doubleAccounting.
    #[serde(default)]
    pub underline: Option<String>,

    /// Font size in points (1-409).
    #[serde(default)]
    pub font_size: Option<f64>,

    /// Font family name (e.g. 'Arial', 'Calibri').
    #[serde(default)]
    pub font_family: Option<String>,

    /// Font color as 6-digit hexadecimal RGB (e.g. 'FF0000').
    #[serde(default)]
    pub font_color: Option<String>,

    /// Background fill color as 6-digit hexadecimal RGB. Implies a solid fill
    /// when no `fill_pattern` is given.
    #[serde(default)]
    pub bg_color: Option<String>,

    /// Fill pattern: none, solid, darkGray, mediumGray, lightGray, gray125, gray0625.
    #[serde(default)]
    pub fill_pattern: Option<String>,

    /// Border style applied to all four edges: none, thin, medium, dashed,
    /// dotted, thick, double, hair, mediumDashed, dashDot, mediumDashDot,
    /// dashDotDot, mediumDashDotDot, slantDashDot.
    #[serde(default)]
    pub border_type: Option<String>,

    /// Border color as 6-digit hexadecimal RGB.
    #[serde(default)]
    pub border_color: Option<String>,

    /// Number format name or code (e.g. '0.00%', 'yyyy-mm-dd', '#,##0.00').
    #[serde(default)]
    pub number_format: Option<String>,

    /// Horizontal alignment: general, left, center, right, fill, justify,
    /// centerContinuous, distributed.
    #[serde(default)]
    pub horizontal_align: Option<String>,

    /// Vertical alignment: top, center, bottom, justify, distributed.
    #[serde(default)]
    pub vertical_align: Option<String>,

    /// Enable text wrapping.
    #[serde(default)]
    pub wrap_text: Option<bool>,

    /// Degrees to rotate text (-90 to 90).
    #[serde(default)]
    pub text_rotation: Option<f64>,

    /// Merge the range into one cell after styling.
    #[serde(default)]
    pub merge_cells: Option<bool>,

    /// Lock cells (takes effect once the sheet is protected).
    #[serde(default)]
    pub protection_lock: Option<bool>,

    /// Conditional formatting rules as JSON. Accepted but not applied.
    #[serde(default)]
    pub conditional_format: Option<String>,
}

// ============================================================================
// Output Structure
// ============================================================================

/// Result of formatting a range.
#[derive(Debug, Serialize, JsonSchema)]
struct FormatRangeResult {
    sheet_name: String,
    /// Normalized range, e.g. `A1:C3`
    range: String,
    /// Number of cells that received the style
    cells_formatted: u64,
    /// Whether the range was merged
    merged: bool,
    /// Resolved number format, when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    number_format: Option<ResolvedFormat>,
    /// Parameters that were accepted but not applied
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ignored: Vec<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Format range tool.
pub struct FormatRangeTool;

impl FormatRangeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "format_range";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Apply comprehensive formatting to a range of cells in an Excel worksheet. \
        Supports font styling, colors, borders, alignment, number formats, text rotation, \
        merging and cell protection.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, sheet = %params.sheet_name, start = %params.start_cell))]
    pub fn execute(params: &FormatRangeParams, config: &Config) -> CallToolResult {
        info!("Format range tool called");
        into_call_result(Self::format(params, config))
    }

    fn format(
        params: &FormatRangeParams,
        config: &Config,
    ) -> Result<(String, FormatRangeResult), ToolError> {
        require_non_empty(&params.filepath, "filepath")?;
        require_non_empty(&params.sheet_name, "sheet_name")?;
        require_non_empty(&params.start_cell, "start_cell")?;

        let end_cell = params
            .end_cell
            .as_deref()
            .filter(|cell| !cell.trim().is_empty())
            .unwrap_or(&params.start_cell);
        let range = CellRange::new(CellRef::parse(&params.start_cell)?, CellRef::parse(end_cell)?);

        // Everything is validated before the workbook is touched
        let mut formats = CustomFormatRegistry::new();
        let (style, number_format) = build_style(params, &mut formats)?;

        let (path, mut book) = open_workbook(&params.filepath, config)?;
        let sheet = sheet_mut(&mut book, &params.sheet_name)?;

        for cell in range.cells() {
            sheet.get_cell_mut(cell.position()).set_style(style.clone());
        }
        debug!("Styled {} cells in {}", range.cell_count(), range);

        let merged = params.merge_cells.unwrap_or(false) && !range.is_single_cell();
        if merged {
            sheet.add_merge_cells(range.to_string());
        }

        save_workbook(&book, &path)?;

        let mut ignored = Vec::new();
        if params
            .conditional_format
            .as_deref()
            .is_some_and(|rules| !rules.trim().is_empty())
        {
            warn!("conditional_format is not supported and was ignored");
            ignored.push("conditional_format".to_string());
        }

        Ok((
            format!(
                "Successfully formatted range {}:{} in sheet '{}'",
                params.start_cell, end_cell, params.sheet_name
            ),
            FormatRangeResult {
                sheet_name: params.sheet_name.clone(),
                range: range.to_string(),
                cells_formatted: range.cell_count(),
                merged,
                number_format,
                ignored,
            },
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: FormatRangeParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<FormatRangeParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<FormatRangeResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: FormatRangeParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

/// Optional string argument, treating blank as absent.
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Translate the parameters into a single umya `Style`.
fn build_style(
    params: &FormatRangeParams,
    formats: &mut CustomFormatRegistry,
) -> Result<(Style, Option<ResolvedFormat>), ToolError> {
    let mut style = Style::default();

    let font = style.get_font_mut();
    if let Some(bold) = params.bold {
        font.set_bold(bold);
    }
    if let Some(italic) = params.italic {
        font.set_italic(italic);
    }
    if let Some(underline) = given(&params.underline) {
        font.set_underline(underline_style(underline)?);
    }
    if let Some(size) = params.font_size.filter(|size| *size > 0.0) {
        font.set_size(size);
    }
    if let Some(family) = given(&params.font_family) {
        font.set_name(family);
    }
    if let Some(color) = given(&params.font_color) {
        font.get_color_mut().set_argb(argb_color(color)?);
    }

    let bg_color = given(&params.bg_color).map(argb_color).transpose()?;
    let pattern = match given(&params.fill_pattern) {
        Some(name) => Some(fill_pattern(name)?.value.clone()),
        None if bg_color.is_some() => Some(PatternValues::Solid),
        None => None,
    };
    if let Some(pattern) = pattern {
        let fill = style.get_fill_mut().get_pattern_fill_mut();
        fill.set_pattern_type(pattern);
        if let Some(color) = bg_color {
            fill.get_foreground_color_mut().set_argb(color);
        }
    }

    if let Some(border_type) = given(&params.border_type) {
        let border_name = border_style(border_type)?;
        let border_color = given(&params.border_color).map(argb_color).transpose()?;

        let apply = |side: &mut Border| {
            side.set_border_style(border_name);
            if let Some(color) = &border_color {
                side.get_color_mut().set_argb(color.clone());
            }
        };

        let borders = style.get_borders_mut();
        apply(borders.get_top_border_mut());
        apply(borders.get_right_border_mut());
        apply(borders.get_bottom_border_mut());
        apply(borders.get_left_border_mut());
    }

    let alignment = style.get_alignment_mut();
    if let Some(horizontal) = given(&params.horizontal_align) {
        alignment.set_horizontal(horizontal_alignment(horizontal)?);
    }
    if let Some(vertical) = given(&params.vertical_align) {
        alignment.set_vertical(vertical_alignment(vertical)?);
    }
    if let Some(wrap) = params.wrap_text {
        alignment.set_wrap_text(wrap);
    }
    if let Some(degrees) = params.text_rotation {
        alignment.set_text_rotation(text_rotation(degrees)?);
    }

    // Spaces are significant in format codes, so no trimming here
    let number_format = match params.number_format.as_deref().filter(|s| !s.is_empty()) {
        Some(specifier) => {
            let resolved = resolve_with(formats, specifier)
                .map_err(|e| ToolError::invalid_arguments(format!("invalid number format: {}", e)))?;
            debug!(code = %resolved.code, "Resolved number format '{}'", specifier);
            style
                .get_number_format_mut()
                .set_format_code(resolved.format_code.clone());
            Some(resolved)
        }
        None => None,
    };

    if let Some(locked) = params.protection_lock {
        style.get_protection_mut().set_locked(locked);
    }

    Ok((style, number_format))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::formats::{FormatCode, FormatOrigin};
    use tempfile::TempDir;
    use umya_spreadsheet::structs::HorizontalAlignmentValues;

    fn sample_workbook(dir: &TempDir) -> String {
        let path = dir.path().join("format.xlsx");
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value_number(0.25);
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path.to_string_lossy().to_string()
    }

    fn base_params(filepath: &str) -> FormatRangeParams {
        FormatRangeParams {
            filepath: filepath.to_string(),
            sheet_name: "Sheet1".to_string(),
            start_cell: "A1".to_string(),
            ..Default::default()
        }
    }

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_format_single_cell_defaults_end_to_start() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            bold: Some(true),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "Successfully formatted range A1:A1 in sheet 'Sheet1'"
        );

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        let style = sheet.get_cell((1, 1)).unwrap().get_style();
        assert!(*style.get_font().unwrap().get_bold());
    }

    #[test]
    fn test_format_range_applies_number_format_and_alignment() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            end_cell: Some("B2".to_string()),
            number_format: Some("0.00%".to_string()),
            horizontal_align: Some("center".to_string()),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["range"], "A1:B2");
        assert_eq!(structured["cells_formatted"], 4);
        assert_eq!(structured["number_format"]["code"], 10);
        assert_eq!(structured["number_format"]["origin"], "built_in");

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        for position in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            let style = sheet.get_cell(position).unwrap().get_style();
            assert_eq!(
                style.get_number_format().unwrap().get_format_code(),
                "0.00%"
            );
            assert_eq!(
                style.get_alignment().unwrap().get_horizontal(),
                &HorizontalAlignmentValues::Center
            );
        }
        assert!(sheet.get_cell((3, 3)).is_none());
    }

    #[test]
    fn test_invalid_number_format_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);
        let before = std::fs::read(&filepath).unwrap();

        let params = FormatRangeParams {
            number_format: Some("0.00€".to_string()),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("invalid number format: "));
        assert_eq!(std::fs::read(&filepath).unwrap(), before);
    }

    #[test]
    fn test_invalid_border_type() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            border_type: Some("wavy".to_string()),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "invalid border type: wavy");
    }

    #[test]
    fn test_border_without_color() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            border_type: Some("thin".to_string()),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(false));

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        let style = book
            .get_sheet_by_name("Sheet1")
            .unwrap()
            .get_cell((1, 1))
            .unwrap()
            .get_style();
        let borders = style.get_borders().unwrap();
        assert_eq!(borders.get_top_border().get_border_style(), "thin");
        assert_eq!(borders.get_left_border().get_border_style(), "thin");
    }

    #[test]
    fn test_merge_cells() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            end_cell: Some("C1".to_string()),
            merge_cells: Some(true),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());
        assert_eq!(result.structured_content.unwrap()["merged"], true);

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        let merges: Vec<String> = book
            .get_sheet_by_name("Sheet1")
            .unwrap()
            .get_merge_cells()
            .iter()
            .map(|range| range.get_range())
            .collect();
        assert_eq!(merges, vec!["A1:C1".to_string()]);
    }

    #[test]
    fn test_conditional_format_reported_as_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            conditional_format: Some(r#"{"type":"cell"}"#.to_string()),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content.unwrap()["ignored"],
            serde_json::json!(["conditional_format"])
        );
    }

    #[test]
    fn test_missing_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let params = FormatRangeParams {
            sheet_name: "Nope".to_string(),
            ..base_params(&filepath)
        };
        let result = FormatRangeTool::execute(&params, &Config::default());
        assert_eq!(result_text(&result), "worksheet 'Nope' not found");
    }

    #[test]
    fn test_required_fields() {
        let params = FormatRangeParams {
            start_cell: String::new(),
            ..base_params("book.xlsx")
        };
        let result = FormatRangeTool::execute(&params, &Config::default());
        assert_eq!(
            result_text(&result),
            "start_cell is required and must be a non-empty string"
        );
    }

    #[test]
    fn test_build_style_custom_format_code() {
        let mut formats = CustomFormatRegistry::new();
        let params = FormatRangeParams {
            number_format: Some("0.0000".to_string()),
            ..Default::default()
        };

        let (style, resolved) = build_style(&params, &mut formats).unwrap();
        let resolved = resolved.unwrap();
        assert_eq!(resolved.code, FormatCode::CUSTOM_ALLOCATION_START);
        assert_eq!(resolved.origin, FormatOrigin::Custom);
        assert_eq!(
            style.get_number_format().unwrap().get_format_code(),
            "0.0000"
        );
    }

    #[test]
    fn test_build_style_bg_color_implies_solid_fill() {
        let mut formats = CustomFormatRegistry::new();
        let params = FormatRangeParams {
            bg_color: Some("FFFF00".to_string()),
            ..Default::default()
        };

        let (style, _) = build_style(&params, &mut formats).unwrap();
        let fill = style.get_fill().unwrap().get_pattern_fill().unwrap();
        assert_eq!(fill.get_pattern_type(), &PatternValues::Solid);
        assert_eq!(fill.get_foreground_color().unwrap().get_argb(), "FFFFFF00");
    }

    #[test]
    fn test_build_style_without_fill_options_has_no_fill() {
        let mut formats = CustomFormatRegistry::new();
        let (style, _) = build_style(&FormatRangeParams::default(), &mut formats).unwrap();
        assert!(style.get_fill().is_none());
    }

    #[test]
    fn test_build_style_rejects_bad_color_and_rotation() {
        let mut formats = CustomFormatRegistry::new();

        let params = FormatRangeParams {
            font_color: Some("red".to_string()),
            ..Default::default()
        };
        assert!(build_style(&params, &mut formats).is_err());

        let params = FormatRangeParams {
            text_rotation: Some(120.0),
            ..Default::default()
        };
        assert!(build_style(&params, &mut formats).is_err());
    }
}
