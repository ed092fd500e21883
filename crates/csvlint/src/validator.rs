//! Structural validation driver.

use std::borrow::Cow;
use std::io::BufRead;
use std::time::Instant;

use tracing::{debug, debug_span, trace, warn};

use crate::error::{CsvLintError, Result};
use crate::input::row::{scan_row, RowScan};
use crate::input::{split_lines, ReaderLines};
use crate::schema::ValidationProfile;
use crate::validation::{
    codes, FieldValidator, MessageType, Severity, ValidationMessage, ValidationResult,
};

/// Options for a validation call.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Field separator.
    pub separator: char,
    /// Quote character.
    pub quote: char,
    /// Treat the first logical row as a header.
    pub has_header: bool,
    /// Content rules; `None` means structural validation only.
    pub profile: Option<ValidationProfile>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            quote: '"',
            has_header: false,
            profile: None,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options taken from a profile document: its separator, its header
    /// flag, and the profile itself.
    pub fn from_profile(profile: ValidationProfile) -> Result<Self> {
        Ok(Self {
            separator: profile.separator_char()?,
            has_header: profile.has_header,
            profile: Some(profile),
            ..Self::default()
        })
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_profile(mut self, profile: ValidationProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    fn check(&self) -> Result<()> {
        for (label, c) in [("separator", self.separator), ("quote", self.quote)] {
            if c == '\r' || c == '\n' {
                return Err(CsvLintError::InvalidOptions(format!(
                    "{label} cannot be a line terminator"
                )));
            }
        }

        if self.separator == self.quote {
            return Err(CsvLintError::InvalidOptions(format!(
                "separator and quote are both '{}'",
                self.separator
            )));
        }

        if let Some(profile) = &self.profile {
            profile.check()?;
        }

        Ok(())
    }
}

/// Validates CSV text for RFC 4180 structure and, with a profile, content.
///
/// # Example
///
/// ```
/// use csvlint::{CsvValidator, ValidationOptions};
///
/// let validator = CsvValidator::new(ValidationOptions::new()).unwrap();
/// let result = validator.validate_str("a,b\r\n\"x,y\",z");
///
/// assert!(result.is_valid());
/// assert_eq!(result.field_count, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CsvValidator {
    options: ValidationOptions,
}

impl CsvValidator {
    /// Create a validator, rejecting unusable options.
    pub fn new(options: ValidationOptions) -> Result<Self> {
        options.check()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate a sequence of physical lines.
    ///
    /// A line that ends inside a quoted field is joined to the next one with
    /// `\r\n` and the merged row is scanned again from the start.
    pub fn validate<I, S>(&self, lines: I) -> ValidationResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let span = debug_span!(
            "validate",
            separator = %self.options.separator,
            has_header = self.options.has_header,
            profile = self.options.profile.as_ref().map(|p| p.name.as_str()),
        );
        let _enter = span.enter();

        let mut pass = Pass::new(
            self.options.has_header,
            FieldValidator::new(self.options.profile.as_ref()),
        );
        let mut pending: Option<String> = None;

        for line in lines {
            let line = line.as_ref();
            let logical = match pending.take() {
                Some(mut buffered) => {
                    buffered.push_str("\r\n");
                    buffered.push_str(line);
                    trace!(bytes = buffered.len(), "merged continuation line");
                    Cow::Owned(buffered)
                }
                None => Cow::Borrowed(line),
            };

            let complete = {
                let scan = scan_row(&logical, self.options.separator, self.options.quote);
                if scan.needs_continuation() {
                    false
                } else {
                    pass.finish_row(&scan);
                    true
                }
            };

            if !complete {
                pending = Some(logical.into_owned());
            }
        }

        if let Some(buffered) = pending {
            let scan = scan_row(&buffered, self.options.separator, self.options.quote);
            let row = pass.finish_row(&scan);
            if let Some((field_number, character)) = scan.open_quote {
                warn!(row, field_number, character, "unterminated quoted field at end of input");
                pass.messages.push(
                    ValidationMessage::structural(
                        codes::UNTERMINATED_QUOTE,
                        row,
                        "Unterminated quoted field at end of input",
                    )
                    .with_field(field_number, "")
                    .with_character(character),
                );
            }
        }

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let result = pass.into_result(elapsed_ms);

        debug!(
            rows = result.data_row_count,
            fields = result.field_count,
            errors = result.error_count(),
            elapsed_ms,
            "validation finished"
        );

        result
    }

    /// Validate in-memory text, splitting it on `\r\n`, `\n` or `\r`.
    pub fn validate_str(&self, text: &str) -> ValidationResult {
        self.validate(split_lines(text))
    }

    /// Validate UTF-8 text from a reader.
    pub fn validate_reader<R: BufRead>(&self, reader: R) -> Result<ValidationResult> {
        let mut failure = None;
        let lines = ReaderLines::new(reader).map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                failure = Some(e);
                None
            }
        });

        let result = self.validate(lines);

        match failure {
            Some(e) => Err(CsvLintError::stream(e)),
            None => Ok(result),
        }
    }
}

/// What a logical row is, decided before its fields are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRole {
    Header,
    Data(usize),
}

impl RowRole {
    fn row_number(self) -> usize {
        match self {
            RowRole::Header => 0,
            RowRole::Data(row) => row,
        }
    }
}

/// Accumulator for one validation call.
struct Pass<'p> {
    has_header: bool,
    fields: FieldValidator<'p>,
    rows_seen: usize,
    data_rows: usize,
    expected_fields: Option<usize>,
    headers: Vec<String>,
    messages: Vec<ValidationMessage>,
}

impl<'p> Pass<'p> {
    fn new(has_header: bool, fields: FieldValidator<'p>) -> Self {
        Self {
            has_header,
            fields,
            rows_seen: 0,
            data_rows: 0,
            expected_fields: None,
            headers: Vec::new(),
            messages: Vec::new(),
        }
    }

    fn next_role(&self) -> RowRole {
        if self.has_header && self.rows_seen == 0 {
            RowRole::Header
        } else {
            RowRole::Data(self.data_rows + 1)
        }
    }

    /// Record a complete logical row and return its row number.
    fn finish_row(&mut self, scan: &RowScan<'_>) -> usize {
        let role = self.next_role();
        let row = role.row_number();
        self.rows_seen += 1;

        let mut quote_errors = scan.quote_errors.iter().peekable();
        for (index, text) in scan.fields.iter().enumerate() {
            let position = index + 1;

            while let Some(error) = quote_errors.next_if(|e| e.field_number == position) {
                self.messages.push(
                    ValidationMessage::structural(codes::MISPLACED_QUOTE, row, error.kind.description())
                        .with_field(error.field_number, "")
                        .with_character(error.character),
                );
            }

            match role {
                RowRole::Header => self.headers.push((*text).to_string()),
                RowRole::Data(_) => {
                    let found = self.fields.validate_field(text, row, position);
                    self.messages.extend(found);
                }
            }
        }

        if let RowRole::Data(row) = role {
            self.data_rows = row;
        }

        let count = scan.field_count();
        match self.expected_fields {
            None => self.expected_fields = Some(count),
            Some(expected) if expected != count => {
                self.messages.push(ValidationMessage::structural(
                    codes::FIELD_COUNT_MISMATCH,
                    row,
                    format!(
                        "{count} fields detected; mismatch with first row's field count of {expected}"
                    ),
                ));
            }
            Some(_) => {}
        }

        row
    }

    fn into_result(mut self, elapsed_ms: f64) -> ValidationResult {
        for (index, name) in self.headers.iter().enumerate() {
            let position = index + 1;
            let header_message = if name.is_empty() {
                Some((
                    codes::EMPTY_HEADER,
                    Severity::Warning,
                    format!("Field name at position {position} is empty"),
                ))
            } else if name.trim().is_empty() {
                Some((
                    codes::WHITESPACE_HEADER,
                    Severity::Information,
                    format!("Field name at position {position} is whitespace"),
                ))
            } else {
                None
            };

            if let Some((code, severity, content)) = header_message {
                self.messages.push(
                    ValidationMessage::new(code, severity, MessageType::Structural, 0, content)
                        .with_field(position, name.as_str()),
                );
            }
        }

        ValidationResult::new(
            elapsed_ms,
            self.data_rows,
            self.expected_fields.unwrap_or(0),
            self.headers,
            self.messages,
        )
    }
}
