//! csvlint CLI - validate CSV files against RFC 4180 and a column profile.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            file,
            profile,
            separator,
            quote,
            header,
            no_header,
            json,
            max_messages,
        } => commands::validate::run(
            commands::validate::ValidateArgs {
                file,
                profile,
                separator,
                quote,
                header: header_override(header, no_header),
                json,
                max_messages,
            },
            cli.verbose,
        ),

        Commands::Profile { file, json } => commands::profile::run(file, json, cli.verbose),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `--header` / `--no-header` as an override of the profile's header flag.
fn header_override(header: bool, no_header: bool) -> Option<bool> {
    match (header, no_header) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
