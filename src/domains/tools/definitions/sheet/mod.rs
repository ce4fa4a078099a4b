pub mod create;
pub mod delete;
pub mod rename;

pub use create::CreateWorksheetTool;
pub use delete::DeleteWorksheetTool;
pub use rename::RenameWorksheetTool;
