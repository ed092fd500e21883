//! csvlint: structural and content validation for CSV data.
//!
//! Validation runs two independent contracts over a sequence of lines:
//!
//! - **Structure**: RFC 4180 quoting, separators, consistent field counts
//!   and header sanity.
//! - **Content**: an optional [`ValidationProfile`] constraining each
//!   column's type, length, required-ness, format, pattern and allowed values.
//!
//! The output is a [`ValidationResult`]: every diagnostic found plus summary
//! counts. Nothing is thrown for bad data; only configuration and I/O
//! problems surface as [`CsvLintError`].
//!
//! # Example
//!
//! ```
//! use csvlint::{CsvValidator, ValidationOptions};
//!
//! let validator = CsvValidator::new(ValidationOptions::new().with_header(true)).unwrap();
//! let result = validator.validate_str("NAME,AGE\r\nMary,25\r\nJohn,31");
//!
//! assert!(result.is_valid());
//! assert_eq!(result.data_row_count, 2);
//! assert_eq!(result.headers, vec!["NAME", "AGE"]);
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod validation;

mod validator;

pub use crate::validator::{CsvValidator, ValidationOptions};
pub use error::{CsvLintError, Result};
pub use input::{split_lines, ReaderLines};
pub use schema::{ColumnProfile, ColumnType, FormatTemplate, ValidationProfile};
pub use validation::{
    codes, FieldValidator, MessageType, Severity, ValidationMessage, ValidationResult,
};
