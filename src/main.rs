//! Binary entry point for css-relay.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use css_relay::cli::output::{OutputFormat, format_error};
use css_relay::cli::{Cli, execute};
use css_relay::error::{Error, IoError};
use css_relay::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.format);
    let default_filter = if cli.verbose {
        "css_relay=debug"
    } else {
        "css_relay=warn"
    };
    logging::init(default_filter, format == OutputFormat::Json);

    match execute(&cli).await {
        Ok(diagnostics) => {
            if !diagnostics.is_empty() {
                eprint!("{diagnostics}");
            }
            ExitCode::SUCCESS
        }
        // Downstream closed the pipe (e.g., piped to `head`); not a failure
        Err(Error::Io(IoError::BrokenPipe)) => ExitCode::SUCCESS,
        Err(e) => {
            // Errors always go to stderr; stdout is reserved for CSS
            let formatted = format_error(&e, format);
            match format {
                OutputFormat::Json => eprintln!("{formatted}"),
                OutputFormat::Text => eprintln!("Error: {formatted}"),
            }
            ExitCode::FAILURE
        }
    }
}
