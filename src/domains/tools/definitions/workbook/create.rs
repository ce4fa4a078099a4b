//! Create workbook tool definition.
//!
//! Creates a new `.xlsx` file holding a single empty worksheet.

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
    into_call_result, new_workbook_path, save_workbook, sheet_names,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the create workbook tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWorkbookParams {
    /// Path where to create the new Excel file.
    pub filepath: String,
}

// ============================================================================
// Output Structure
// ============================================================================

/// Result of creating a workbook.
#[derive(Debug, Serialize, JsonSchema)]
struct CreateWorkbookResult {
    /// Path the workbook was written to
    filepath: String,
    /// Worksheets in the new workbook
    sheets: Vec<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create workbook tool.
pub struct CreateWorkbookTool;

impl CreateWorkbookTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_workbook";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new Excel workbook";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath))]
    pub fn execute(params: &CreateWorkbookParams, config: &Config) -> CallToolResult {
        info!("Create workbook tool called");
        into_call_result(Self::create(params, config))
    }

    fn create(
        params: &CreateWorkbookParams,
        config: &Config,
    ) -> Result<(String, CreateWorkbookResult), ToolError> {
        let path = new_workbook_path(&params.filepath, config)?;

        let book = umya_spreadsheet::new_file();
        save_workbook(&book, &path)?;

        info!("Workbook created at {}", path.display());

        Ok((
            format!("Excel workbook created at: {}", params.filepath),
            CreateWorkbookResult {
                filepath: params.filepath.clone(),
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
        let params: CreateWorkbookParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CreateWorkbookParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<CreateWorkbookResult>().into()),
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
                let params: CreateWorkbookParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SecurityConfig;
    use tempfile::TempDir;

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_create_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.xlsx");
        let filepath = path.to_string_lossy().to_string();

        let params = CreateWorkbookParams {
            filepath: filepath.clone(),
        };
        let result = CreateWorkbookTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            format!("Excel workbook created at: {}", filepath)
        );
        assert!(path.exists());

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        assert_eq!(sheet_names(&book), vec!["Sheet1".to_string()]);

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["sheets"][0], "Sheet1");
    }

    #[test]
    fn test_create_workbook_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("new.xlsx");

        let params = CreateWorkbookParams {
            filepath: path.to_string_lossy().to_string(),
        };
        let result = CreateWorkbookTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        assert!(!path.exists());
    }

    #[test]
    fn test_create_workbook_outside_root() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let path = outside.path().join("escape.xlsx");

        let mut config = Config::default();
        config.security = SecurityConfig {
            root_path: Some(root.path().to_path_buf()),
            allow_symlinks: false,
        };

        let params = CreateWorkbookParams {
            filepath: path.to_string_lossy().to_string(),
        };
        let result = CreateWorkbookTool::execute(&params, &config);

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("outside allowed root"));
        assert!(!path.exists());
    }

    #[test]
    fn test_create_workbook_empty_path() {
        let params = CreateWorkbookParams {
            filepath: String::new(),
        };
        let result = CreateWorkbookTool::execute(&params, &Config::default());

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("filepath is required"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_create_workbook_http_handler() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("http.xlsx");

        let args = serde_json::json!({ "filepath": path.to_string_lossy() });
        let result = CreateWorkbookTool::http_handler(args, Arc::new(Config::default()));

        assert!(result.is_ok());
        assert!(path.exists());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_create_workbook_http_handler_missing_param() {
        let result =
            CreateWorkbookTool::http_handler(serde_json::json!({}), Arc::new(Config::default()));
        assert!(result.is_err());
    }
}
