//! Server info resource definition.

use rmcp::model::ResourceContents;

use super::{DynamicResourceProvider, ResourceDefinition, json_contents};
use crate::core::config::Config;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};
use crate::domains::tools::ToolRegistry;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "excel://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Server name, version and the spreadsheet tools it exposes";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl DynamicResourceProvider for ServerInfoResource {
    fn resolve(uri: &str, config: &Config) -> Result<ResourceContents, ResourceError> {
        let tools: Vec<String> = ToolRegistry::get_all_tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        let info = serde_json::json!({
            "server": config.server.name,
            "version": config.server.version,
            "tools": tools,
            "root_path": config.security.root_path,
        });

        json_contents(uri, &info)
    }
}
