//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: spreadsheet formatting rules, the tools clients call, and the
//! resources they can read.

pub mod formats;
pub mod resources;
pub mod tools;
