//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file, grouped by what it operates on.

pub mod common;
pub mod data;
pub mod format;
pub mod sheet;
pub mod workbook;

pub use data::{ReadDataTool, WriteDataTool};
pub use format::FormatRangeTool;
pub use sheet::{CreateWorksheetTool, DeleteWorksheetTool, RenameWorksheetTool};
pub use workbook::{CreateWorkbookTool, GetWorkbookMetadataTool};
