// Security module for path validation and access control
//
// Every workbook path handed to a tool goes through this module so that
// reads and writes stay inside the configured root directory.

pub mod path_validator;

pub use path_validator::{PathSecurityError, validate_new_path, validate_path};
