//! Diagnostics and the schema-driven field validator.

mod field;
mod message;
mod result;

pub use field::FieldValidator;
pub use message::{codes, MessageType, Severity, ValidationMessage};
pub use result::ValidationResult;
