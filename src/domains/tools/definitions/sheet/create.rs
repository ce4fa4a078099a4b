//! Create worksheet tool definition.

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
    into_call_result, open_workbook, require_non_empty, save_workbook, sheet_names,
    validate_sheet_name,
};

/// Parameters for the create worksheet tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWorksheetParams {
    /// Path to the Excel file.
    pub filepath: String,

    /// Name of the worksheet to create.
    pub sheet_name: String,
}

/// Result of adding a worksheet.
#[derive(Debug, Serialize, JsonSchema)]
struct CreateWorksheetResult {
    sheet_name: String,
    /// Worksheets after the change
    sheets: Vec<String>,
}

/// Create worksheet tool.
pub struct CreateWorksheetTool;

impl CreateWorksheetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_worksheet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create new worksheet in workbook";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, sheet = %params.sheet_name))]
    pub fn execute(params: &CreateWorksheetParams, config: &Config) -> CallToolResult {
        info!("Create worksheet tool called");
        into_call_result(Self::create(params, config))
    }

    fn create(
        params: &CreateWorksheetParams,
        config: &Config,
    ) -> Result<(String, CreateWorksheetResult), ToolError> {
        require_non_empty(&params.sheet_name, "sheet_name")?;
        validate_sheet_name(&params.sheet_name)?;
        let (path, mut book) = open_workbook(&params.filepath, config)?;

        if book.get_sheet_by_name(&params.sheet_name).is_some() {
            return Err(ToolError::sheet_exists(&params.sheet_name));
        }

        book.new_sheet(&params.sheet_name)
            .map_err(|e| ToolError::execution_failed(format!("failed to create worksheet: {}", e)))?;
        save_workbook(&book, &path)?;

        Ok((
            format!("Worksheet '{}' created successfully", params.sheet_name),
            CreateWorksheetResult {
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
        let params: CreateWorksheetParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CreateWorksheetParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<CreateWorksheetResult>().into()),
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
                let params: CreateWorksheetParams =
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

    fn blank_workbook(dir: &TempDir) -> String {
        let path = dir.path().join("sheets.xlsx");
        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_create_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = blank_workbook(&temp_dir);

        let params = CreateWorksheetParams {
            filepath: filepath.clone(),
            sheet_name: "Summary".to_string(),
        };
        let result = CreateWorksheetTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["sheets"], serde_json::json!(["Sheet1", "Summary"]));

        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        assert!(book.get_sheet_by_name("Summary").is_some());
    }

    #[test]
    fn test_create_existing_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = blank_workbook(&temp_dir);

        let params = CreateWorksheetParams {
            filepath,
            sheet_name: "Sheet1".to_string(),
        };
        let result = CreateWorksheetTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "worksheet 'Sheet1' already exists");
    }

    #[test]
    fn test_create_worksheet_empty_name() {
        let temp_dir = TempDir::new().unwrap();
        let params = CreateWorksheetParams {
            filepath: blank_workbook(&temp_dir),
            sheet_name: String::new(),
        };
        let result = CreateWorksheetTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_create_worksheet_name_too_long() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = blank_workbook(&temp_dir);
        let params = CreateWorksheetParams {
            filepath: filepath.clone(),
            sheet_name: "x".repeat(40),
        };
        let result = CreateWorksheetTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        let book = umya_spreadsheet::reader::xlsx::read(&filepath).unwrap();
        assert_eq!(book.get_sheet_collection().len(), 1);
    }
}
