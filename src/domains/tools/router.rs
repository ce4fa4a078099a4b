//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    CreateWorkbookTool, CreateWorksheetTool, DeleteWorksheetTool, FormatRangeTool,
    GetWorkbookMetadataTool, ReadDataTool, RenameWorksheetTool, WriteDataTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(CreateWorkbookTool::create_route(config.clone()))
        .with_route(WriteDataTool::create_route(config.clone()))
        .with_route(ReadDataTool::create_route(config.clone()))
        .with_route(CreateWorksheetTool::create_route(config.clone()))
        .with_route(DeleteWorksheetTool::create_route(config.clone()))
        .with_route(RenameWorksheetTool::create_route(config.clone()))
        .with_route(GetWorkbookMetadataTool::create_route(config.clone()))
        .with_route(FormatRangeTool::create_route(config))
}
