//! Profile command - load a validation profile and show its columns.

use std::path::PathBuf;

use colored::Colorize;
use csvlint::{ColumnProfile, ValidationProfile};

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let profile = ValidationProfile::from_path(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(true);
    }

    let title = if profile.name.is_empty() {
        file.display().to_string()
    } else {
        profile.name.clone()
    };
    println!("{} {}", "Profile".cyan().bold(), title.white().bold());

    if !profile.description.is_empty() {
        println!("{}", profile.description);
    }

    println!(
        "Separator: {:?}  Header row: {}  Columns: {}",
        profile.separator_char()?,
        if profile.has_header { "yes" } else { "no" },
        profile.column_count()
    );
    println!();

    for (i, column) in profile.columns.iter().enumerate() {
        println!(
            "  {:>3}  {:20} {:8} {}",
            i + 1,
            column.name,
            column.column_type.to_string(),
            describe_rules(column).dimmed()
        );

        if verbose && !column.description.is_empty() {
            println!("       {}", column.description);
        }
    }

    Ok(true)
}

/// One-line summary of a column's constraints.
fn describe_rules(column: &ColumnProfile) -> String {
    let mut rules = Vec::new();

    // Numeric bounds limit the value, all others limit the length.
    let measure = if column.column_type.is_numeric() { "" } else { "length " };
    match (column.min, column.max) {
        (Some(min), Some(max)) => rules.push(format!("{}{}..={}", measure, min, max)),
        (Some(min), None) => rules.push(format!("{}>={}", measure, min)),
        (None, Some(max)) => rules.push(format!("{}<={}", measure, max)),
        (None, None) => {}
    }

    if column.required {
        rules.push("required".to_string());
    }
    if !column.can_be_null_or_empty {
        rules.push("not null".to_string());
    }
    if !column.values.is_empty() {
        let case = if column.are_values_case_sensitive { "" } else { " (any case)" };
        rules.push(format!("one of [{}]{}", column.values.join(", "), case));
    }
    if let Some(format) = &column.format {
        rules.push(format!("format '{}'", format));
    }
    if let Some(regex) = column.regex.as_deref().filter(|r| !r.trim().is_empty()) {
        rules.push(format!("regex /{}/", regex));
    }

    rules.join(", ")
}
