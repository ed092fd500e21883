//! Core type definitions for schema representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared data type for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text, constrained by length, format and regex.
    #[default]
    String,
    /// 64-bit signed whole numbers.
    Integer,
    /// Floating-point numbers.
    Decimal,
    /// The literals `true` / `false`, case-insensitive.
    Boolean,
    /// A string restricted to an allowed set of values.
    Enum,
}

impl ColumnType {
    /// Returns true if values of this type are parsed as numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Decimal)
    }

    /// The name used in profile documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Decimal => "decimal",
            ColumnType::Boolean => "boolean",
            ColumnType::Enum => "enum",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
