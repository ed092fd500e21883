//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvlint: RFC 4180 and schema validation for CSV files
#[derive(Parser)]
#[command(name = "csvlint")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a CSV file
    Validate {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Validation profile (JSON) with column rules
        #[arg(short, long, value_name = "PROFILE")]
        profile: Option<PathBuf>,

        /// Field separator (e.g. ",", ";", "tab")
        #[arg(short, long, value_parser = parse_char)]
        separator: Option<char>,

        /// Quote character
        #[arg(short, long, value_parser = parse_char)]
        quote: Option<char>,

        /// Treat the first row as a header
        #[arg(long)]
        header: bool,

        /// Treat the first row as data, even if the profile declares a header
        #[arg(long, conflicts_with = "header")]
        no_header: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of messages to print
        #[arg(long, default_value = "50")]
        max_messages: usize,
    },

    /// Show the columns of a validation profile
    Profile {
        /// Path to the profile document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the parsed profile as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse a single character, accepting names for characters that are hard
/// to type on a command line.
pub fn parse_char(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\\t" => return Ok('\t'),
        "space" => return Ok(' '),
        "pipe" => return Ok('|'),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got '{}'", value)),
    }
}
