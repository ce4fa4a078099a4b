//! Write data tool definition.
//!
//! Writes a block of rows into a worksheet, creating the sheet if needed.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use umya_spreadsheet::Cell;

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    CellRef, into_call_result, open_workbook, require_non_empty, save_workbook, sheet_mut,
    validate_sheet_name,
};

// ============================================================================
// Tool Parameters
// ============================================================================

fn default_start_cell() -> String {
    "A1".to_string()
}

/// Parameters for the write data tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WriteDataParams {
    /// Path to the Excel file.
    pub filepath: String,

    /// Name of the worksheet to write to (created when missing).
    pub sheet_name: String,

    /// List of lists containing data to write (sublists are rows).
    pub data: Vec<Vec<Value>>,

    /// Cell to start writing to (default: A1).
    #[serde(default = "default_start_cell")]
    pub start_cell: String,
}

// ============================================================================
// Output Structure
// ============================================================================

/// Result of a write operation.
#[derive(Debug, Serialize, JsonSchema)]
struct WriteDataResult {
    /// Worksheet written to
    sheet_name: String,
    /// Top-left cell of the written block
    start_cell: String,
    /// Number of rows written
    rows_written: usize,
    /// Number of non-null cells written
    cells_written: usize,
    /// Whether the worksheet had to be created
    sheet_created: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Write data tool.
pub struct WriteDataTool;

impl WriteDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "write_data_to_excel";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Write data to an Excel worksheet";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(filepath = %params.filepath, sheet = %params.sheet_name, rows = params.data.len()))]
    pub fn execute(params: &WriteDataParams, config: &Config) -> CallToolResult {
        info!("Write data tool called");
        into_call_result(Self::write(params, config))
    }

    fn write(
        params: &WriteDataParams,
        config: &Config,
    ) -> Result<(String, WriteDataResult), ToolError> {
        require_non_empty(&params.sheet_name, "sheet_name")?;
        validate_sheet_name(&params.sheet_name)?;
        let start = CellRef::parse(&params.start_cell)
            .map_err(|_| ToolError::invalid_arguments(format!("invalid start cell: {}", params.start_cell)))?;

        let (path, mut book) = open_workbook(&params.filepath, config)?;

        let sheet_created = book.get_sheet_by_name(&params.sheet_name).is_none();
        if sheet_created {
            debug!("Creating missing worksheet '{}'", params.sheet_name);
            book.new_sheet(&params.sheet_name)
                .map_err(|e| ToolError::execution_failed(format!("failed to create worksheet: {}", e)))?;
        }

        let sheet = sheet_mut(&mut book, &params.sheet_name)?;
        let mut cells_written = 0;

        for (row_offset, row) in params.data.iter().enumerate() {
            for (col_offset, value) in row.iter().enumerate() {
                if value.is_null() {
                    continue;
                }
                let target = start.offset(col_offset as u32, row_offset as u32)?;
                write_value(sheet.get_cell_mut(target.position()), value);
                cells_written += 1;
            }
        }

        save_workbook(&book, &path)?;

        info!(
            "Wrote {} rows ({} cells) to '{}'",
            params.data.len(),
            cells_written,
            params.sheet_name
        );

        Ok((
            format!("Successfully wrote {} rows to Excel", params.data.len()),
            WriteDataResult {
                sheet_name: params.sheet_name.clone(),
                start_cell: start.to_string(),
                rows_written: params.data.len(),
                cells_written,
                sheet_created,
            },
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: WriteDataParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let result = Self::execute(&params, &config);
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<WriteDataParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<WriteDataResult>().into()),
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
                let params: WriteDataParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

/// Store a JSON value in a cell, keeping numbers and booleans typed.
fn write_value(cell: &mut Cell, value: &Value) {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(number) => {
                cell.set_value_number(number);
            }
            None => {
                cell.set_value_string(n.to_string());
            }
        },
        Value::Bool(b) => {
            cell.set_value_bool(*b);
        }
        Value::String(s) => {
            cell.set_value_string(s.as_str());
        }
        Value::Array(_) | Value::Object(_) => {
            cell.set_value_string(value.to_string());
        }
        Value::Null => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
