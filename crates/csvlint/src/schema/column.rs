//! Column profile definition.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::format::FormatTemplate;
use super::types::ColumnType;
use crate::error::{CsvLintError, Result};

/// Validation rules for one column position.
///
/// Deserializes from the profile document's column record. The regex and
/// the fixed-format template are compiled once here, never per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ColumnDocument")]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// 1-based position declared in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,
    /// Declared data type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Allowed values for enum columns.
    pub values: Vec<String>,
    /// Whether enum comparison is case-sensitive.
    pub are_values_case_sensitive: bool,
    /// Lower bound: string length or numeric value.
    pub min: Option<i64>,
    /// Upper bound: string length or numeric value.
    pub max: Option<i64>,
    /// Empty values are an error.
    pub required: bool,
    /// Empty values and the literal `null` are permitted.
    #[serde(rename = "null_or_empty")]
    pub can_be_null_or_empty: bool,
    /// Fixed-format template source.
    pub format: Option<String>,
    /// Regular expression source.
    pub regex: Option<String>,
    #[serde(skip)]
    compiled_format: Option<FormatTemplate>,
    #[serde(skip)]
    compiled_regex: Option<Regex>,
    #[serde(skip)]
    folded_values: Vec<String>,
}

/// Wire shape of a column record.
#[derive(Debug, Deserialize)]
struct ColumnDocument {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ordinal: Option<usize>,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default)]
    values: Option<Vec<String>>,
    #[serde(default)]
    are_values_case_sensitive: Option<bool>,
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    null_or_empty: Option<bool>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    regex: Option<String>,
}

impl TryFrom<ColumnDocument> for ColumnProfile {
    type Error = CsvLintError;

    fn try_from(doc: ColumnDocument) -> Result<Self> {
        let mut column = ColumnProfile::new(doc.name, doc.column_type);
        column.description = doc.description.unwrap_or_default();
        column.ordinal = doc.ordinal;
        column.are_values_case_sensitive = doc.are_values_case_sensitive.unwrap_or(true);
        column.min = doc.min;
        column.max = doc.max;
        column.required = doc.required.unwrap_or(false);
        column.can_be_null_or_empty = doc.null_or_empty.unwrap_or(true);
        column = column.with_values(doc.values.unwrap_or_default());
        if let Some(format) = doc.format {
            column = column.with_format(format);
        }
        match doc.regex {
            Some(regex) => column.with_regex(regex),
            None => Ok(column),
        }
    }
}

impl ColumnProfile {
    /// Create a column with no constraints beyond its type.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            ordinal: None,
            column_type,
            values: Vec::new(),
            are_values_case_sensitive: true,
            min: None,
            max: None,
            required: false,
            can_be_null_or_empty: true,
            format: None,
            regex: None,
            compiled_format: None,
            compiled_regex: None,
            folded_values: Vec::new(),
        }
    }

    /// Set both bounds.
    pub fn with_bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Mark the column as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Allow or disallow empty values and the literal `null`.
    pub fn null_or_empty(mut self, allowed: bool) -> Self {
        self.can_be_null_or_empty = allowed;
        self
    }

    /// Set the allowed enum values.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self.folded_values = self.values.iter().map(|v| v.to_lowercase()).collect();
        self
    }

    /// Set enum comparison case sensitivity.
    pub fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.are_values_case_sensitive = sensitive;
        self
    }

    /// Set and compile the fixed-format template. An empty string clears it.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        if format.is_empty() {
            self.format = None;
            self.compiled_format = None;
        } else {
            self.compiled_format = Some(FormatTemplate::compile(&format));
            self.format = Some(format);
        }
        self
    }

    /// Set and compile the regular expression. A blank pattern disables it.
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        self.compiled_regex = if pattern.trim().is_empty() {
            None
        } else {
            Some(Regex::new(&pattern).map_err(|source| CsvLintError::Regex {
                column: self.name.clone(),
                source,
            })?)
        };
        self.regex = Some(pattern);
        Ok(self)
    }

    /// Effective lower bound, defaulting to the natural minimum.
    pub fn effective_min(&self) -> i64 {
        self.min.unwrap_or(i64::MIN)
    }

    /// Effective upper bound, defaulting to the natural maximum.
    pub fn effective_max(&self) -> i64 {
        self.max.unwrap_or(i64::MAX)
    }

    /// The compiled fixed-format template, if any.
    pub fn format_template(&self) -> Option<&FormatTemplate> {
        self.compiled_format.as_ref()
    }

    /// The compiled regular expression, if any.
    pub fn compiled_regex(&self) -> Option<&Regex> {
        self.compiled_regex.as_ref()
    }

    /// Check a value against the allowed enum values.
    pub fn allows_value(&self, value: &str) -> bool {
        if self.are_values_case_sensitive {
            self.values.iter().any(|v| v == value)
        } else {
            let folded = value.to_lowercase();
            self.folded_values.iter().any(|v| *v == folded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let column: ColumnProfile =
            serde_json::from_str(r#"{"name": "NAME", "type": "string"}"#).unwrap();

        assert_eq!(column.name, "NAME");
        assert_eq!(column.column_type, ColumnType::String);
        assert_eq!(column.effective_min(), i64::MIN);
        assert_eq!(column.effective_max(), i64::MAX);
        assert!(!column.required);
        assert!(column.can_be_null_or_empty);
        assert!(column.are_values_case_sensitive);
        assert!(column.format_template().is_none());
        assert!(column.compiled_regex().is_none());
    }

    #[test]
    fn test_deserialize_nulls_use_natural_bounds() {
        let column: ColumnProfile = serde_json::from_str(
            r#"{"name": "AGE", "type": "integer", "min": null, "max": null,
                "format": null, "regex": null}"#,
        )
        .unwrap();

        assert_eq!(column.min, None);
        assert_eq!(column.effective_max(), i64::MAX);
    }

    #[test]
    fn test_regex_compiled_on_load() {
        let column: ColumnProfile = serde_json::from_str(
            r#"{"name": "CODE", "type": "string", "regex": "^[a-z]{3}$"}"#,
        )
        .unwrap();

        let regex = column.compiled_regex().unwrap();
        assert!(regex.is_match("cat"));
        assert!(!regex.is_match("ca"));
    }

    #[test]
    fn test_blank_regex_disabled() {
        let column = ColumnProfile::new("CODE", ColumnType::String)
            .with_regex("   ")
            .unwrap();
        assert!(column.compiled_regex().is_none());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = serde_json::from_str::<ColumnProfile>(
            r#"{"name": "CODE", "type": "string", "regex": "([a-z"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("CODE"));
    }

    #[test]
    fn test_enum_case_sensitivity() {
        let column = ColumnProfile::new("STATUS", ColumnType::Enum)
            .with_values(["Confirmed", "Probable"]);
        assert!(column.allows_value("Confirmed"));
        assert!(!column.allows_value("confirmed"));

        let column = column.case_sensitive(false);
        assert!(column.allows_value("CONFIRMED"));
        assert!(!column.allows_value("Suspect"));
    }
}
