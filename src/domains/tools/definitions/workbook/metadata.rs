//! Workbook metadata tool definition.
//!
//! Lists the worksheets of a workbook and, optionally, the used range of each.

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
use tracing::{debug, info, instrument};
use umya_spreadsheet::Worksheet;

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{CellRef, into_call_result, open_workbook};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the workbook metadata tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWorkbookMetadataParams {
    /// Path to the Excel file.
    pub filepath: String,

    /// Whether to include the used range of every worksheet.
    #[serde(default)]
    pub include_ranges: bool,
}

// ============================================================================
// Output Structure
// ============================================================================

/// Workbook metadata.
#[derive(Debug, Serialize, JsonSchema)]
struct WorkbookMetadata {
    /// Worksheet names in workbook order
    sheets: Vec<String>,
    /// Used range per non-empty sheet, as `[[first_cell, last_cell]]`
    #[serde(skip_serializing_if = "Option::is_none")]
    ranges: Option<BTreeMap<String, Vec<Vec<String>>>>,
    /// Number of worksheets
    num_sheets: usize,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Workbook metadata tool.
pub struct GetWorkbookMetadataTool;

impl GetWorkbookMetadataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_workbook_metadata";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get metadata about workbook including sheets, ranges, etc.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, include_ranges = params.include_ranges))]
    pub fn execute(params: &GetWorkbookMetadataParams, config: &Config) -> CallToolResult {
        info!("Workbook metadata tool called");
        into_call_result(Self::inspect(params, config))
    }

    fn inspect(
        params: &GetWorkbookMetadataParams,
        config: &Config,
    ) -> Result<(String, WorkbookMetadata), ToolError> {
        let (_, book) = open_workbook(&params.filepath, config)?;
        let worksheets = book.get_sheet_collection();

        let sheets: Vec<String> = worksheets
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect();

        let ranges = params.include_ranges.then(|| {
            worksheets
                .iter()
                .filter_map(|sheet| {
                    used_range(sheet).map(|range| (sheet.get_name().to_string(), vec![range]))
                })
                .collect::<BTreeMap<_, _>>()
        });

        let metadata = WorkbookMetadata {
            num_sheets: sheets.len(),
            sheets,
            ranges,
        };

        // The text content carries the same JSON so clients without
        // structured output support still get the data.
        let summary = serde_json::to_string(&metadata)
            .map_err(|e| ToolError::internal(format!("failed to marshal metadata: {}", e)))?;

        Ok((summary, metadata))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: GetWorkbookMetadataParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetWorkbookMetadataParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<WorkbookMetadata>().into()),
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
                let params: GetWorkbookMetadataParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

/// `["A1", "<last column><last row>"]` for a sheet with data, `None` when empty.
fn used_range(sheet: &Worksheet) -> Option<Vec<String>> {
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    if max_col == 0 || max_row == 0 {
        debug!(sheet = sheet.get_name(), "Skipping empty worksheet");
        return None;
    }

    let last = CellRef {
        col: max_col,
        row: max_row,
    };
    Some(vec!["A1".to_string(), last.to_string()])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_workbook(dir: &TempDir) -> String {
        let path = dir.path().join("meta.xlsx");
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value_string("name");
        sheet.get_cell_mut((3, 4)).set_value_number(42.0);
        book.new_sheet("Empty").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_metadata_without_ranges() {
        let temp_dir = TempDir::new().unwrap();
        let params = GetWorkbookMetadataParams {
            filepath: sample_workbook(&temp_dir),
            include_ranges: false,
        };

        let result = GetWorkbookMetadataTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["num_sheets"], 2);
        assert_eq!(structured["sheets"], serde_json::json!(["Sheet1", "Empty"]));
        assert!(structured.get("ranges").is_none());
    }

    #[test]
    fn test_metadata_with_ranges() {
        let temp_dir = TempDir::new().unwrap();
        let params = GetWorkbookMetadataParams {
            filepath: sample_workbook(&temp_dir),
            include_ranges: true,
        };

        let result = GetWorkbookMetadataTool::execute(&params, &Config::default());
        let structured = result.structured_content.unwrap();

        assert_eq!(
            structured["ranges"]["Sheet1"],
            serde_json::json!([["A1", "C4"]])
        );
        assert!(structured["ranges"].get("Empty").is_none());
    }

    #[test]
    fn test_metadata_text_is_json() {
        let temp_dir = TempDir::new().unwrap();
        let params = GetWorkbookMetadataParams {
            filepath: sample_workbook(&temp_dir),
            include_ranges: false,
        };

        let result = GetWorkbookMetadataTool::execute(&params, &Config::default());
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        };
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["num_sheets"], 2);
    }

    #[test]
    fn test_metadata_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let params = GetWorkbookMetadataParams {
            filepath: temp_dir
                .path()
                .join("nope.xlsx")
                .to_string_lossy()
                .to_string(),
            include_ranges: false,
        };

        let result = GetWorkbookMetadataTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_metadata_not_a_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plain.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();

        let params = GetWorkbookMetadataParams {
            filepath: path.to_string_lossy().to_string(),
            include_ranges: false,
        };

        let result = GetWorkbookMetadataTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(true));
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.starts_with("failed to open Excel file"));
    }
}
