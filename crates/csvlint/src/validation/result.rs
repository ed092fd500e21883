//! Aggregate result of one validation pass.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::message::{Severity, ValidationMessage};

/// Everything one `validate` call found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Unique identifier for this result.
    pub id: String,
    /// Wall-clock time spent validating, in milliseconds.
    pub elapsed_ms: f64,
    /// When the validation finished.
    pub validated_at: DateTime<Utc>,
    /// Number of logical data rows (header excluded).
    pub data_row_count: usize,
    /// Field count of the first row; 0 for empty input.
    pub field_count: usize,
    /// Header names, only when a header row was expected.
    pub headers: Vec<String>,
    /// All diagnostics in discovery order.
    pub messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub(crate) fn new(
        elapsed_ms: f64,
        data_row_count: usize,
        field_count: usize,
        headers: Vec<String>,
        messages: Vec<ValidationMessage>,
    ) -> Self {
        Self {
            id: generate_result_id(),
            elapsed_ms,
            validated_at: Utc::now(),
            data_row_count,
            field_count,
            headers,
            messages,
        }
    }

    /// True iff no message has `Error` severity.
    pub fn is_valid(&self) -> bool {
        !self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    /// Number of `Error` messages.
    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    /// Number of `Warning` messages.
    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    /// Number of `Information` messages.
    pub fn information_count(&self) -> usize {
        self.count_severity(Severity::Information)
    }

    /// Message counts keyed by code, in order of first appearance.
    pub fn counts_by_code(&self) -> IndexMap<u32, usize> {
        let mut counts = IndexMap::new();
        for message in &self.messages {
            *counts.entry(message.code).or_insert(0) += 1;
        }
        counts
    }

    /// Messages reported against a given row.
    pub fn messages_for_row(&self, row: usize) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(move |m| m.row == row)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.messages.iter().filter(|m| m.severity == severity).count()
    }
}

/// Generate a unique result ID.
fn generate_result_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!("val_{:06}", COUNTER.fetch_add(1, Ordering::Relaxed))
}
