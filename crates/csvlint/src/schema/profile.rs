//! Profile-level schema definition.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::column::ColumnProfile;
use crate::error::{CsvLintError, Result};

fn default_has_header() -> bool {
    true
}

/// The full schema document: file metadata plus ordered column profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationProfile {
    /// Profile name.
    #[serde(default)]
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// File the profile was written for. Informational only.
    #[serde(default)]
    pub filename: String,
    /// Field separator as written in the document (one character).
    #[serde(default)]
    pub separator: String,
    /// Whether the data starts with a header row.
    #[serde(default = "default_has_header")]
    pub has_header: bool,
    /// Column profiles in field order.
    #[serde(default)]
    pub columns: Vec<ColumnProfile>,
}

impl ValidationProfile {
    /// Create an empty profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            filename: String::new(),
            separator: ",".to_string(),
            has_header: true,
            columns: Vec::new(),
        }
    }

    /// Append a column profile.
    pub fn with_column(mut self, column: ColumnProfile) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Set whether a header row is expected.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Deserialize a profile document and check its invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: ValidationProfile = serde_json::from_str(json)?;
        profile.check()?;
        Ok(profile)
    }

    /// Read a profile document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let profile: ValidationProfile = serde_json::from_reader(reader)?;
        profile.check()?;
        Ok(profile)
    }

    /// Load a profile document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CsvLintError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Check the profile's invariants.
    ///
    /// - every column's effective `min <= max`;
    /// - declared ordinals equal the column's 1-based position.
    pub fn check(&self) -> Result<()> {
        for (index, column) in self.columns.iter().enumerate() {
            if column.effective_min() > column.effective_max() {
                return Err(CsvLintError::InvalidProfile(format!(
                    "column '{}' has min {} greater than max {}",
                    column.name,
                    column.effective_min(),
                    column.effective_max()
                )));
            }

            if let Some(ordinal) = column.ordinal {
                if ordinal != index + 1 {
                    return Err(CsvLintError::InvalidProfile(format!(
                        "column '{}' has ordinal {} but is at position {}",
                        column.name,
                        ordinal,
                        index + 1
                    )));
                }
            }
        }

        Ok(())
    }

    /// The separator as a single character.
    ///
    /// An empty separator means the default `,`.
    pub fn separator_char(&self) -> Result<char> {
        let mut chars = self.separator.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(','),
            (Some(c), None) => Ok(c),
            _ => Err(CsvLintError::InvalidProfile(format!(
                "separator must be a single character, got '{}'",
                self.separator
            ))),
        }
    }

    /// Get a column by its 1-based field position.
    pub fn column_at(&self, position: usize) -> Option<&ColumnProfile> {
        position.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self::new("")
    }
}
