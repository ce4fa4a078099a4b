//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::Config;

use super::definitions::{
    CreateWorkbookTool, CreateWorksheetTool, DeleteWorksheetTool, FormatRangeTool,
    GetWorkbookMetadataTool, ReadDataTool, RenameWorksheetTool, WriteDataTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            CreateWorkbookTool::NAME,
            WriteDataTool::NAME,
            ReadDataTool::NAME,
            CreateWorksheetTool::NAME,
            DeleteWorksheetTool::NAME,
            RenameWorksheetTool::NAME,
            GetWorkbookMetadataTool::NAME,
            FormatRangeTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            CreateWorkbookTool::to_tool(),
            WriteDataTool::to_tool(),
            ReadDataTool::to_tool(),
            CreateWorksheetTool::to_tool(),
            DeleteWorksheetTool::to_tool(),
            RenameWorksheetTool::to_tool(),
            GetWorkbookMetadataTool::to_tool(),
            FormatRangeTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let config = self.config.clone();
        match name {
            CreateWorkbookTool::NAME => CreateWorkbookTool::http_handler(arguments, config),
            WriteDataTool::NAME => WriteDataTool::http_handler(arguments, config),
            ReadDataTool::NAME => ReadDataTool::http_handler(arguments, config),
            CreateWorksheetTool::NAME => CreateWorksheetTool::http_handler(arguments, config),
            DeleteWorksheetTool::NAME => DeleteWorksheetTool::http_handler(arguments, config),
            RenameWorksheetTool::NAME => RenameWorksheetTool::http_handler(arguments, config),
            GetWorkbookMetadataTool::NAME => {
                GetWorkbookMetadataTool::http_handler(arguments, config)
            }
            FormatRangeTool::NAME => FormatRangeTool::http_handler(arguments, config),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}
