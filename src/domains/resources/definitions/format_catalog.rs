//! Format catalog resource definition.
//!
//! Publishes the names `format_range` accepts so clients can discover them
//! without trial and error.

use rmcp::model::ResourceContents;

use super::{DynamicResourceProvider, ResourceDefinition, json_contents};
use crate::core::config::Config;
use crate::domains::formats::number::{BUILTIN_FORMATS, COMMON_CUSTOM_FORMATS, MAX_SECTIONS};
use crate::domains::formats::style::{
    BORDER_STYLES, FILL_PATTERNS, HORIZONTAL_ALIGNMENTS, UNDERLINE_STYLES, VERTICAL_ALIGNMENTS,
};
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Number format and style name catalog (dynamic).
pub struct FormatCatalogResource;

impl ResourceDefinition for FormatCatalogResource {
    const URI: &'static str = "excel://formats/catalog";
    const NAME: &'static str = "Format Catalog";
    const DESCRIPTION: &'static str =
        "Built-in and common custom number formats, border styles, fill patterns and alignments";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::FormatCatalog)
    }
}

impl DynamicResourceProvider for FormatCatalogResource {
    fn resolve(uri: &str, _config: &Config) -> Result<ResourceContents, ResourceError> {
        let fill_patterns: Vec<&str> = FILL_PATTERNS.iter().map(|pattern| pattern.name).collect();

        let catalog = serde_json::json!({
            "number_formats": {
                "builtin": BUILTIN_FORMATS,
                "common_custom": COMMON_CUSTOM_FORMATS,
                "max_sections": MAX_SECTIONS,
            },
            "border_styles": BORDER_STYLES,
            "fill_patterns": fill_patterns,
            "underline_styles": UNDERLINE_STYLES,
            "horizontal_alignments": HORIZONTAL_ALIGNMENTS,
            "vertical_alignments": VERTICAL_ALIGNMENTS,
        });

        json_contents(uri, &catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> serde_json::Value {
        let contents =
            FormatCatalogResource::resolve(FormatCatalogResource::URI, &Config::default()).unwrap();
        let ResourceContents::TextResourceContents { text, .. } = contents else {
            panic!("Expected text contents");
        };
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_catalog_number_formats() {
        let catalog = catalog();
        let builtin = catalog["number_formats"]["builtin"].as_array().unwrap();
        assert!(
            builtin
                .iter()
                .any(|f| f["code"] == 10 && f["format_code"] == "0.00%")
        );

        let custom = catalog["number_formats"]["common_custom"].as_array().unwrap();
        assert_eq!(custom.len(), 17);
        assert_eq!(custom[0]["code"], 164);
    }

    #[test]
    fn test_catalog_style_names() {
        let catalog = catalog();
        assert_eq!(catalog["border_styles"].as_array().unwrap().len(), 14);
        assert!(
            catalog["fill_patterns"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("gray0625"))
        );
    }
}
