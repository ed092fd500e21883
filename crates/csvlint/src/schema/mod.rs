//! Validation profile types: the declarative schema for CSV content.

mod column;
mod format;
mod profile;
mod types;

pub use column::ColumnProfile;
pub use format::{is_date_format, DatePattern, FormatTemplate, FormatViolation, DATE_PREFIXES};
pub use profile::ValidationProfile;
pub use types::ColumnType;
