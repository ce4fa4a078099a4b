pub mod range;

pub use range::FormatRangeTool;
