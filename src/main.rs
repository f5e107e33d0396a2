//! is-mergeable - check whether a GitHub pull request is ready to be merged

mod cli;

use clap::{CommandFactory, Parser};
use cli::Cli;
use cli::style::Stylize;
use is_mergeable::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when the pull request is not ready
const EXIT_NOT_READY: u8 = 1;

/// Exit status for validation and unexpected errors
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::run_check(&cli).await {
        Ok(verdict) if verdict.is_ready_to_merge => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_NOT_READY),
        Err(err) => {
            let is_validation = err
                .downcast_ref::<Error>()
                .is_some_and(Error::is_validation);
            if is_validation {
                print_usage_error(&err);
            } else {
                anstream::eprintln!("{} {err:#}", "error:".error());
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage_error(err: &anyhow::Error) {
    let actual = std::iter::once("is-mergeable".to_string())
        .chain(std::env::args().skip(1))
        .collect::<Vec<_>>()
        .join(" ");

    anstream::eprintln!();
    anstream::eprintln!("{} {err}", "error:".error());
    anstream::eprintln!(
        "{} is-mergeable <owner>/<repo>#<pull-request>",
        "Expected:".error()
    );
    anstream::eprintln!("{} {actual}", "Actual:".error());
    anstream::eprintln!();
    anstream::eprintln!("{}", Cli::command().render_help());
}
