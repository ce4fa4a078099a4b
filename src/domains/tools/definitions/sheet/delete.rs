//! Delete worksheet tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    into_call_result, open_workbook, require_non_empty, save_workbook, sheet, sheet_names,
};

/// Parameters for the delete worksheet tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteWorksheetParams {
    /// Path to the Excel file.
    pub filepath: String,

    /// Name of the worksheet to delete.
    pub sheet_name: String,
}

/// Result of removing a worksheet.
#[derive(Debug, Serialize, JsonSchema)]
struct DeleteWorksheetResult {
    sheet_name: String,
    /// Worksheets remaining after the change
    sheets: Vec<String>,
}

/// Delete worksheet tool.
pub struct DeleteWorksheetTool;

impl DeleteWorksheetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_worksheet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete worksheet from workbook";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, sheet = %params.sheet_name))]
    pub fn execute(params: &DeleteWorksheetParams, config: &Config) -> CallToolResult {
        info!("Delete worksheet tool called");
        into_call_result(Self::delete(params, config))
    }

    fn delete(
        params: &DeleteWorksheetParams,
        config: &Config,
    ) -> Result<(String, DeleteWorksheetResult), ToolError> {
        require_non_empty(&params.sheet_name, "sheet_name")?;
        let (path, mut book) = open_workbook(&params.filepath, config)?;

        // A workbook must keep at least one sheet
        if book.get_sheet_collection().len() == 1 {
            return Err(ToolError::execution_failed(
                "cannot delete the last worksheet in a workbook",
            ));
        }
        sheet(&book, &params.sheet_name)?;

        book.remove_sheet_by_name(&params.sheet_name)
            .map_err(|e| ToolError::execution_failed(format!("failed to delete worksheet: {}", e)))?;
        save_workbook(&book, &path)?;

        Ok((
            format!("Worksheet '{}' deleted successfully", params.sheet_name),
            DeleteWorksheetResult {
                sheet_name: params.sheet_name.clone(),
                sheets: sheet_names(&book),
            },
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: DeleteWorksheetParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DeleteWorksheetParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DeleteWorksheetResult>().into()),
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
                let params: DeleteWorksheetParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workbook_with(dir: &TempDir, extra: &[&str]) -> String {
        let path = dir.path().join("sheets.xlsx");
        let mut book = umya_spreadsheet::new_file();
        for name in extra {
            book.new_sheet(*name).unwrap();
        }
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path.to_string_lossy().to_string()
    }

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_delete_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = workbook_with(&temp_dir, &["Scratch"]);

        let params = DeleteWorksheetParams {
            filepath: filepath.clone(),
            sheet_name: "Scratch".to_string(),
        };
        let result = DeleteWorksheetTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "Worksheet 'Scratch' deleted successfully");

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        assert_eq!(sheet_names(&book), vec!["Sheet1".to_string()]);
    }

    #[test]
    fn test_delete_last_worksheet_refused() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = workbook_with(&temp_dir, &[]);

        let params = DeleteWorksheetParams {
            filepath: filepath.clone(),
            sheet_name: "Sheet1".to_string(),
        };
        let result = DeleteWorksheetTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            "cannot delete the last worksheet in a workbook"
        );

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        assert!(book.get_sheet_by_name("Sheet1").is_some());
    }

    #[test]
    fn test_delete_missing_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = workbook_with(&temp_dir, &["Other"]);

        let params = DeleteWorksheetParams {
            filepath,
            sheet_name: "Ghost".to_string(),
        };
        let result = DeleteWorksheetTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "worksheet 'Ghost' not found");
    }
}
