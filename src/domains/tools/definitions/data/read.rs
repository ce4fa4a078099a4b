//! Read data tool definition.
//!
//! Returns the used area of a worksheet as rows of strings. Values are
//! rendered through each cell's number format unless `raw` is set.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};
use umya_spreadsheet::Worksheet;

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    into_call_result, open_workbook, require_non_empty, sheet,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the read data tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadDataParams {
    /// Path to the Excel file.
    pub filepath: String,

    /// Name of the worksheet to read from.
    pub sheet_name: String,

    /// Return stored values instead of number-formatted display text
    #[serde(default)]
    pub raw: bool,
}

// ============================================================================
// Output Structure
// ============================================================================

/// Sheet contents.
#[derive(Debug, Serialize, JsonSchema)]
struct ReadDataResult {
    /// Worksheet read
    sheet_name: String,
    /// Rows starting at A1; trailing empty cells and rows are dropped
    rows: Vec<Vec<String>>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Read data tool.
pub struct ReadDataTool;

impl ReadDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "read_data_from_excel";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read data from an Excel worksheet";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, sheet = %params.sheet_name))]
    pub fn execute(params: &ReadDataParams, config: &Config) -> CallToolResult {
        info!("Read data tool called");
        into_call_result(Self::read(params, config))
    }

    fn read(params: &ReadDataParams, config: &Config) -> Result<(String, ReadDataResult), ToolError> {
        require_non_empty(&params.sheet_name, "sheet_name")?;
        let (_, book) = open_workbook(&params.filepath, config)?;
        let worksheet = sheet(&book, &params.sheet_name)?;

        let rows = sheet_rows(worksheet, params.raw);
        info!("Read {} rows from '{}'", rows.len(), params.sheet_name);

        // Same JSON in the text content for clients that ignore structured output.
        let summary = serde_json::to_string(&rows)
            .map_err(|e| ToolError::internal(format!("failed to marshal data to JSON: {}", e)))?;

        Ok((
            summary,
            ReadDataResult {
                sheet_name: params.sheet_name.clone(),
                rows,
            },
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: ReadDataParams = serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ReadDataParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ReadDataResult>().into()),
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
                let params: ReadDataParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

/// Collect cell values row by row from A1 to the last non-empty cell.
///
/// Only stored cells are visited, so styled but empty cells far from the
/// data cost nothing. Rows keep their position: gaps become empty rows and
/// empty cells before the last value of a row become `""`.
fn sheet_rows(worksheet: &Worksheet, raw: bool) -> Vec<Vec<String>> {
    let mut by_row: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();

    for cell in worksheet.get_cell_collection() {
        if cell.get_value().is_empty() {
            continue;
        }
        let coordinate = cell.get_coordinate();
        let value = if raw {
            cell.get_value().into_owned()
        } else {
            cell.get_formatted_value()
        };
        by_row
            .entry(*coordinate.get_row_num())
            .or_default()
            .insert(*coordinate.get_col_num(), value);
    }

    let Some(&last_row) = by_row.keys().next_back() else {
        return Vec::new();
    };

    let mut rows = vec![Vec::new(); last_row as usize];
    for (row, cells) in by_row {
        let last_col = cells.keys().next_back().copied().unwrap_or(0);
        let mut values = vec![String::new(); last_col as usize];
        for (col, value) in cells {
            values[col as usize - 1] = value;
        }
        rows[row as usize - 1] = values;
    }
    rows
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_workbook(dir: &TempDir) -> String {
        let path = dir.path().join("read.xlsx");
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value_string("name");
        sheet.get_cell_mut((2, 1)).set_value_string("qty");
        sheet.get_cell_mut((1, 2)).set_value_string("bolt");
        sheet.get_cell_mut((2, 2)).set_value_number(12.0);
        sheet.get_cell_mut((3, 3)).set_value_string("note");
        book.new_sheet("Blank").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path.to_string_lossy().to_string()
    }

    fn params(filepath: &str, sheet_name: &str) -> ReadDataParams {
        ReadDataParams {
            filepath: filepath.to_string(),
            sheet_name: sheet_name.to_string(),
            raw: false,
        }
    }

    #[test]
    fn test_read_rows() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let result = ReadDataTool::execute(&params(&filepath, "Sheet1"), &Config::default());
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(
            structured["rows"],
            serde_json::json!([["name", "qty"], ["bolt", "12"], ["", "", "note"]])
        );
    }

    #[test]
    fn test_read_text_is_json_rows() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let result = ReadDataTool::execute(&params(&filepath, "Sheet1"), &Config::default());
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        };
        let rows: Vec<Vec<String>> = serde_json::from_str(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["name", "qty"]);
    }

    #[test]
    fn test_read_empty_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let result = ReadDataTool::execute(&params(&filepath, "Blank"), &Config::default());
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["rows"], serde_json::json!([]));
    }

    #[test]
    fn test_read_missing_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = sample_workbook(&temp_dir);

        let result = ReadDataTool::execute(&params(&filepath, "Nope"), &Config::default());
        assert_eq!(result.is_error, Some(true));
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "worksheet 'Nope' not found");
    }

    #[test]
    fn test_trailing_empty_cells_trimmed() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value_string("a");
        sheet.get_cell_mut((4, 1)).set_value_string("");
        sheet.get_cell_mut((1, 3)).set_value_string("");

        let rows = sheet_rows(book.get_sheet_by_name("Sheet1").unwrap(), false);
        assert_eq!(rows, vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_styled_empty_cell_far_away_is_skipped() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value_string("a");

        let mut style = umya_spreadsheet::Style::default();
        style.get_font_mut().set_bold(true);
        sheet.get_cell_mut((16_384, 1_048_576)).set_style(style);

        let rows = sheet_rows(book.get_sheet_by_name("Sheet1").unwrap(), false);
        assert_eq!(rows, vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_gaps_between_rows_are_kept() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((2, 1)).set_value_string("b");
        sheet.get_cell_mut((1, 3)).set_value_string("c");

        let rows = sheet_rows(book.get_sheet_by_name("Sheet1").unwrap(), false);
        assert_eq!(
            rows,
            vec![
                vec!["".to_string(), "b".to_string()],
                vec![],
                vec!["c".to_string()],
            ]
        );
    }

    #[test]
    fn test_values_use_number_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("percent.xlsx");
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        let cell = sheet.get_cell_mut((1, 1));
        cell.set_value_number(0.25);
        cell.get_style_mut()
            .get_number_format_mut()
            .set_format_code("0.00%");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        let filepath = path.to_string_lossy().to_string();

        let formatted = ReadDataTool::execute(&params(&filepath, "Sheet1"), &Config::default());
        assert_eq!(
            formatted.structured_content.unwrap()["rows"],
            serde_json::json!([["25.00%"]])
        );

        let raw = ReadDataParams {
            raw: true,
            ..params(&filepath, "Sheet1")
        };
        let result = ReadDataTool::execute(&raw, &Config::default());
        assert_eq!(
            result.structured_content.unwrap()["rows"],
            serde_json::json!([["0.25"]])
        );
    }
}
