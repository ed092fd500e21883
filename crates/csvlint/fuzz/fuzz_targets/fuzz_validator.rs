//! Fuzz target for CsvValidator.
//!
//! Checks that validation:
//! 1. Never panics on any input, with or without a header row
//! 2. Agrees between the in-memory and reader line sources
//! 3. Never reports a data row count above the number of physical lines

#![no_main]

use csvlint::{split_lines, CsvValidator, ValidationOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    for has_header in [false, true] {
        let Ok(validator) = CsvValidator::new(ValidationOptions::new().with_header(has_header))
        else {
            return;
        };

        let result = validator.validate_str(input);
        assert!(result.data_row_count <= split_lines(input).count());

        let from_reader = validator
            .validate_reader(input.as_bytes())
            .expect("valid UTF-8 never fails to read");
        assert_eq!(result.data_row_count, from_reader.data_row_count);
        assert_eq!(result.messages.len(), from_reader.messages.len());
    }
});
