pub mod create;
pub mod metadata;

pub use create::CreateWorkbookTool;
pub use metadata::GetWorkbookMetadataTool;
