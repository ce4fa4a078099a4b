pub mod read;
pub mod write;

pub use read::ReadDataTool;
pub use write::WriteDataTool;
