//! Validation message types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric message codes.
///
/// Codes below 9 are structural, 9 and above come from the field validator.
pub mod codes {
    /// Row field count differs from the first row's.
    pub const FIELD_COUNT_MISMATCH: u32 = 1;
    /// Unescaped or misplaced quote.
    pub const MISPLACED_QUOTE: u32 = 2;
    /// Quoted field still open at end of input.
    pub const UNTERMINATED_QUOTE: u32 = 3;
    /// Header name is empty.
    pub const EMPTY_HEADER: u32 = 4;
    /// Header name is whitespace only.
    pub const WHITESPACE_HEADER: u32 = 5;
    /// Enum value not in the allowed set.
    pub const ENUM_VALUE_NOT_ALLOWED: u32 = 9;
    /// String longer than max.
    pub const STRING_TOO_LONG: u32 = 10;
    /// String shorter than min.
    pub const STRING_TOO_SHORT: u32 = 11;
    /// Required field is empty.
    pub const REQUIRED: u32 = 12;
    /// Empty value not allowed.
    pub const EMPTY_NOT_ALLOWED: u32 = 13;
    /// Literal `null` not allowed.
    pub const NULL_NOT_ALLOWED: u32 = 14;
    /// Positional format length mismatch.
    pub const FORMAT_LENGTH: u32 = 15;
    /// Date format parse failure.
    pub const FORMAT_DATE: u32 = 16;
    /// Positional format expected a digit.
    pub const FORMAT_DIGIT: u32 = 17;
    /// Positional format literal mismatch.
    pub const FORMAT_LITERAL: u32 = 18;
    /// Regex did not match.
    pub const REGEX_MISMATCH: u32 = 19;
    /// Not an integer.
    pub const INTEGER_PARSE: u32 = 20;
    /// Integer above max.
    pub const INTEGER_TOO_LARGE: u32 = 21;
    /// Integer below min.
    pub const INTEGER_TOO_SMALL: u32 = 22;
    /// Not a decimal.
    pub const DECIMAL_PARSE: u32 = 30;
    /// Decimal above max.
    pub const DECIMAL_TOO_LARGE: u32 = 31;
    /// Decimal below min.
    pub const DECIMAL_TOO_SMALL: u32 = 32;
    /// Not a boolean.
    pub const BOOLEAN_PARSE: u32 = 40;
}

/// Severity level of a message. Only `Error` affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational only.
    Information,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite problem; the input is invalid.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which contract a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// RFC 4180 structure.
    Structural,
    /// Profile-driven content rules.
    Content,
    Other,
}

/// A single diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Unique identifier for this message.
    pub id: String,
    /// Numeric code, see [`codes`].
    pub code: u32,
    pub severity: Severity,
    pub message_type: MessageType,
    /// 1-based data row. The header row is row 0.
    pub row: usize,
    /// 1-based field position; `None` for row-level problems.
    pub field_number: Option<usize>,
    /// Column name from the profile, empty when not known.
    pub field_name: String,
    /// 0-based character offset within the logical row.
    pub character: Option<usize>,
    /// Human-readable description.
    pub content: String,
}

impl ValidationMessage {
    /// Create a new row-level message.
    pub fn new(
        code: u32,
        severity: Severity,
        message_type: MessageType,
        row: usize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_message_id(),
            code,
            severity,
            message_type,
            row,
            field_number: None,
            field_name: String::new(),
            character: None,
            content: content.into(),
        }
    }

    /// Create a structural error.
    pub fn structural(code: u32, row: usize, content: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, MessageType::Structural, row, content)
    }

    /// Create a content error for a named field.
    pub fn content(
        code: u32,
        row: usize,
        field_number: usize,
        field_name: &str,
        content: impl Into<String>,
    ) -> Self {
        Self::new(code, Severity::Error, MessageType::Content, row, content)
            .with_field(field_number, field_name)
    }

    /// Set the field position and name.
    pub fn with_field(mut self, field_number: usize, field_name: impl Into<String>) -> Self {
        self.field_number = Some(field_number);
        self.field_name = field_name.into();
        self
    }

    /// Set the character offset.
    pub fn with_character(mut self, character: usize) -> Self {
        self.character = Some(character);
        self
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] row {}", self.severity, self.code, self.row)?;
        if let Some(field) = self.field_number {
            write!(f, ", field {}", field)?;
        }
        if let Some(character) = self.character {
            write!(f, ", char {}", character)?;
        }
        write!(f, ": {}", self.content)
    }
}

/// Generate a unique message ID.
fn generate_message_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!("msg_{:06}", COUNTER.fetch_add(1, Ordering::Relaxed))
}
