//! Formats domain module.
//!
//! Resolution of number format specifiers and style names for cell
//! formatting. Everything here is pure and holds no state except the
//! caller-owned [`CustomFormatRegistry`].
//!
//! - `number.rs` - Number format code resolver (built-in and custom tables)
//! - `registry.rs` - Per-workbook allocation of distinct custom format codes
//! - `style.rs` - Border, fill, underline and alignment name tables

mod error;
pub mod number;
pub mod registry;
pub mod style;

pub use error::FormatError;
pub use number::{FormatCode, FormatOrigin, ResolvedFormat, resolve, resolve_format};
pub use registry::{CustomFormatRegistry, resolve_with};
