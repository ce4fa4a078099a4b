//! Rename worksheet tool definition.

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

/// Parameters for the rename worksheet tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenameWorksheetParams {
    /// Path to the Excel file.
    pub filepath: String,

    /// Current name of the worksheet.
    pub old_name: String,

    /// New name for the worksheet.
    pub new_name: String,
}

/// Result of renaming a worksheet.
#[derive(Debug, Serialize, JsonSchema)]
struct RenameWorksheetResult {
    old_name: String,
    new_name: String,
}

/// Rename worksheet tool.
pub struct RenameWorksheetTool;

impl RenameWorksheetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "rename_worksheet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Rename worksheet in workbook";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, from = %params.old_name, to = %params.new_name))]
    pub fn execute(params: &RenameWorksheetParams, config: &Config) -> CallToolResult {
        info!("Rename worksheet tool called");
        into_call_result(Self::rename(params, config))
    }

    fn rename(
        params: &RenameWorksheetParams,
        config: &Config,
    ) -> Result<(String, RenameWorksheetResult), ToolError> {
        require_non_empty(&params.old_name, "old_name")?;
        require_non_empty(&params.new_name, "new_name")?;
        validate_sheet_name(&params.new_name)?;
        let (path, mut book) = open_workbook(&params.filepath, config)?;

        let index = sheet_names(&book)
            .iter()
            .position(|name| *name == params.old_name)
            .ok_or_else(|| ToolError::sheet_not_found(&params.old_name))?;
        if book.get_sheet_by_name(&params.new_name).is_some() {
            return Err(ToolError::sheet_exists(&params.new_name));
        }

        book.set_sheet_name(index, params.new_name.as_str())
            .map_err(|e| ToolError::execution_failed(format!("failed to rename worksheet: {}", e)))?;
        save_workbook(&book, &path)?;

        Ok((
            format!(
                "Worksheet renamed from '{}' to '{}' successfully",
                params.old_name, params.new_name
            ),
            RenameWorksheetResult {
                old_name: params.old_name.clone(),
                new_name: params.new_name.clone(),
            },
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: RenameWorksheetParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<RenameWorksheetParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<RenameWorksheetResult>().into()),
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
                let params: RenameWorksheetParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}
