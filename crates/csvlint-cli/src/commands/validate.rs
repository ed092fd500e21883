//! Validate command - check a CSV file's structure and, with a profile, its content.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use colored::Colorize;
use csvlint::{
    CsvLintError, CsvValidator, Severity, ValidationMessage, ValidationOptions, ValidationProfile,
    ValidationResult,
};
use tracing::info;

/// Arguments of the `validate` subcommand.
pub struct ValidateArgs {
    pub file: PathBuf,
    pub profile: Option<PathBuf>,
    pub separator: Option<char>,
    pub quote: Option<char>,
    /// Overrides the profile's header flag when set.
    pub header: Option<bool>,
    pub json: bool,
    pub max_messages: usize,
}

pub fn run(args: ValidateArgs, verbose: bool) -> Result<bool, Box<dyn std::error::Error>> {
    // Validate input file exists
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let result = validate_file(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result.is_valid());
    }

    println!(
        "{} {}",
        "Validating".cyan().bold(),
        args.file.display().to_string().white()
    );

    if verbose && !result.headers.is_empty() {
        println!();
        println!("{}", "Headers:".yellow().bold());
        for (i, name) in result.headers.iter().enumerate() {
            println!("  {:>3}  {}", i + 1, name);
        }
    }

    if !result.messages.is_empty() {
        println!();
        for message in result.messages.iter().take(args.max_messages) {
            println!("  {}", format_message(message));
        }

        let hidden = result.messages.len().saturating_sub(args.max_messages);
        if hidden > 0 {
            println!("  ... and {} more (use --max-messages or --json)", hidden);
        }
    }

    if verbose && !result.messages.is_empty() {
        println!();
        println!("{}", "Messages by code:".yellow().bold());
        for (code, count) in result.counts_by_code() {
            println!("  {:>4}  {}", code, count);
        }
    }

    println!();
    println!(
        "Checked {} data rows, {} fields in {:.1} ms",
        result.data_row_count.to_string().white().bold(),
        result.field_count,
        result.elapsed_ms
    );
    println!(
        "Found {} messages ({} errors, {} warnings, {} info)",
        result.messages.len().to_string().white().bold(),
        result.error_count().to_string().red(),
        result.warning_count().to_string().yellow(),
        result.information_count().to_string().blue()
    );

    if result.is_valid() {
        println!("{}", "Valid".green().bold());
    } else {
        println!("{}", "Invalid".red().bold());
    }

    Ok(result.is_valid())
}

/// Build options from the profile (if any) and the command-line overrides.
fn build_options(args: &ValidateArgs) -> Result<ValidationOptions, CsvLintError> {
    let mut options = match &args.profile {
        Some(path) => {
            let profile = ValidationProfile::from_path(path)?;
            info!(profile = %profile.name, columns = profile.column_count(), "loaded profile");
            ValidationOptions::from_profile(profile)?
        }
        None => ValidationOptions::new(),
    };

    if let Some(separator) = args.separator {
        options = options.with_separator(separator);
    }
    if let Some(quote) = args.quote {
        options = options.with_quote(quote);
    }
    if let Some(has_header) = args.header {
        options = options.with_header(has_header);
    }

    Ok(options)
}

fn validate_file(args: &ValidateArgs) -> Result<ValidationResult, CsvLintError> {
    let validator = CsvValidator::new(build_options(args)?)?;

    let file = File::open(&args.file).map_err(|e| CsvLintError::Io {
        path: args.file.clone(),
        source: e,
    })?;

    validator.validate_reader(BufReader::new(file))
}

fn format_message(message: &ValidationMessage) -> String {
    let label = match message.severity {
        Severity::Error => message.severity.label().red().bold(),
        Severity::Warning => message.severity.label().yellow().bold(),
        Severity::Information => message.severity.label().blue(),
    };

    let mut location = format!("row {}", message.row);
    if let Some(field) = message.field_number {
        if message.field_name.is_empty() {
            location.push_str(&format!(", field {}", field));
        } else {
            location.push_str(&format!(", field {} ({})", field, message.field_name));
        }
    }
    if let Some(character) = message.character {
        location.push_str(&format!(", char {}", character));
    }

    format!(
        "{} [{}] {}: {}",
        label,
        message.code,
        location.dimmed(),
        message.content
    )
}
