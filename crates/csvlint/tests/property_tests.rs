//! Property-based tests for the validator.
//!
//! Well-formed input is produced by the `csv` crate's writer, which quotes
//! and escapes fields per RFC 4180. Anything it writes must validate cleanly.
//!
//! ```bash
//! cargo test -p csvlint --test property_tests
//! PROPTEST_CASES=10000 cargo test -p csvlint --test property_tests
//! ```

use proptest::prelude::*;

use csvlint::{
    split_lines, ColumnProfile, ColumnType, CsvValidator, FieldValidator, ValidationOptions,
    ValidationProfile, ValidationResult,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Field text, including separators, quotes and embedded line breaks.
fn field_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}",
        "[a-z]{1,5}[,\"][a-z]{1,5}",
        "[a-z]{0,5}(\r\n|\n)[a-z]{0,5}",
        "\"[a-z]{0,5}\"",
    ]
}

/// A table of records, all the same width.
fn table() -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..6).prop_flat_map(|width| {
        prop::collection::vec(prop::collection::vec(field_text(), width), 1..12)
    })
}

fn line_terminator() -> impl Strategy<Value = csv::Terminator> {
    prop_oneof![
        Just(csv::Terminator::CRLF),
        Just(csv::Terminator::Any(b'\n')),
        Just(csv::Terminator::Any(b'\r')),
    ]
}

/// Render records with the reference writer.
fn write_csv(records: &[Vec<String>], separator: u8, terminator: csv::Terminator) -> String {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .terminator(terminator)
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record).unwrap();
    }

    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

/// Message sets compared without ids or timing.
fn fingerprint(result: &ValidationResult) -> Vec<(u32, usize, Option<usize>, Option<usize>, String)> {
    result
        .messages
        .iter()
        .map(|m| (m.code, m.row, m.field_number, m.character, m.content.clone()))
        .collect()
}

// =============================================================================
// Structural Properties
// =============================================================================

proptest! {
    /// RFC 4180 output of the reference writer is always structurally valid.
    #[test]
    fn written_csv_is_valid(
        records in table(),
        separator in prop_oneof![Just(b','), Just(b';'), Just(b'\t'), Just(b'|')],
        terminator in line_terminator(),
    ) {
        let content = write_csv(&records, separator, terminator);
        let options = ValidationOptions::new().with_separator(separator as char);
        let result = CsvValidator::new(options).unwrap().validate_str(&content);

        prop_assert!(result.is_valid(), "content {:?}: {:?}", content, result.messages);
        prop_assert_eq!(result.data_row_count, records.len());
        prop_assert_eq!(result.field_count, records[0].len());
    }

    /// The header row is excluded from the data row count.
    #[test]
    fn header_excluded_from_row_count(records in table()) {
        let content = write_csv(&records, b',', csv::Terminator::CRLF);
        let options = ValidationOptions::new().with_header(true);
        let result = CsvValidator::new(options).unwrap().validate_str(&content);

        prop_assert_eq!(result.data_row_count, records.len() - 1);
        prop_assert_eq!(result.headers.len(), records[0].len());
    }

    /// Row counts do not depend on the line terminator style.
    #[test]
    fn row_count_independent_of_line_endings(records in table()) {
        let validator = CsvValidator::new(ValidationOptions::new()).unwrap();
        let counts: Vec<usize> = [
            csv::Terminator::CRLF,
            csv::Terminator::Any(b'\n'),
            csv::Terminator::Any(b'\r'),
        ]
        .into_iter()
        .map(|t| validator.validate_str(&write_csv(&records, b',', t)).data_row_count)
        .collect();

        prop_assert!(counts.iter().all(|&c| c == records.len()), "{:?}", counts);
    }

    /// Validation never panics on arbitrary text.
    #[test]
    fn never_panics_on_random_text(content in "\\PC{0,200}") {
        let validator = CsvValidator::new(ValidationOptions::new().with_header(true)).unwrap();
        let result = validator.validate_str(&content);
        prop_assert!(result.field_count <= content.chars().count() + 1);
    }

    /// Repeated runs give identical diagnostics.
    #[test]
    fn validation_is_deterministic(content in "[a-z,\"\r\n ]{0,120}") {
        let validator = CsvValidator::new(ValidationOptions::new().with_header(true)).unwrap();
        let first = validator.validate_str(&content);
        let second = validator.validate_str(&content);

        prop_assert_eq!(first.data_row_count, second.data_row_count);
        prop_assert_eq!(first.field_count, second.field_count);
        prop_assert_eq!(&first.headers, &second.headers);
        prop_assert_eq!(fingerprint(&first), fingerprint(&second));
    }

    /// The in-memory and reader line sources agree.
    #[test]
    fn reader_matches_str(content in "[a-z,\"\r\n]{0,120}") {
        let validator = CsvValidator::new(ValidationOptions::new()).unwrap();
        let from_str = validator.validate_str(&content);
        let from_reader = validator.validate_reader(content.as_bytes()).unwrap();

        prop_assert_eq!(from_str.data_row_count, from_reader.data_row_count);
        prop_assert_eq!(fingerprint(&from_str), fingerprint(&from_reader));
    }

    /// Without quotes every physical line is one row.
    #[test]
    fn unquoted_rows_match_lines(content in "[a-z,\r\n]{0,120}") {
        let validator = CsvValidator::new(ValidationOptions::new()).unwrap();
        let result = validator.validate_str(&content);
        prop_assert_eq!(result.data_row_count, split_lines(&content).count());
    }
}

// =============================================================================
// Field Validator Properties
// =============================================================================

proptest! {
    /// In-range integers never produce diagnostics.
    #[test]
    fn integers_in_range_pass(value in 4i64..=32) {
        let profile = ValidationProfile::new("p").with_column(
            ColumnProfile::new("N", ColumnType::Integer).with_bounds(Some(4), Some(32)),
        );
        let validator = FieldValidator::new(Some(&profile));
        prop_assert!(validator.validate_field(&value.to_string(), 1, 1).is_empty());
    }

    /// Out-of-range integers produce exactly one bound diagnostic.
    #[test]
    fn integers_out_of_range_fail_once(
        value in prop_oneof![i64::MIN..4i64, 33i64..=i64::MAX]
    ) {
        let profile = ValidationProfile::new("p").with_column(
            ColumnProfile::new("N", ColumnType::Integer).with_bounds(Some(4), Some(32)),
        );
        let validator = FieldValidator::new(Some(&profile));
        prop_assert_eq!(validator.validate_field(&value.to_string(), 1, 1).len(), 1);
    }

    /// Integer type failures short-circuit to a single diagnostic.
    #[test]
    fn non_numeric_integer_single_message(text in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let profile = ValidationProfile::new("p").with_column(
            ColumnProfile::new("N", ColumnType::Integer)
                .with_bounds(Some(4), Some(32))
                .null_or_empty(false),
        );
        prop_assume!(text != "null");
        let validator = FieldValidator::new(Some(&profile));
        let messages = validator.validate_field(&text, 1, 1);

        prop_assert_eq!(messages.len(), 1);
        prop_assert_eq!(messages[0].code, csvlint::codes::INTEGER_PARSE);
    }

    /// Strings matching a positional template always pass it.
    #[test]
    fn positional_template_accepts_digits(phone in "[0-9]{3}-[0-9]{3}-[0-9]{4}") {
        let profile = ValidationProfile::new("p").with_column(
            ColumnProfile::new("PHONE", ColumnType::String).with_format("###-###-####"),
        );
        let validator = FieldValidator::new(Some(&profile));
        prop_assert!(validator.validate_field(&phone, 1, 1).is_empty());
    }

    /// Calendar dates round-trip through the `yyyy-MM-dd` pattern.
    #[test]
    fn iso_dates_accepted(days in 0i64..80_000) {
        let date = chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
            + chrono::Duration::days(days);
        let profile = ValidationProfile::new("p").with_column(
            ColumnProfile::new("D", ColumnType::String).with_format("yyyy-MM-dd"),
        );
        let validator = FieldValidator::new(Some(&profile));
        let text = date.format("%Y-%m-%d").to_string();
        prop_assert!(validator.validate_field(&text, 1, 1).is_empty(), "{}", text);
    }
}
