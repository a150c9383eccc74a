//! Core library entry for the `casegen` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ports;
pub mod publish;
pub mod requirements;
pub mod retry;
pub mod session;
pub mod stories;
pub mod testcase;
pub mod ticket;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders help and version itself; both are successful exits.
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                print!("{err}");
                return Ok(());
            }
            return Err(err.to_string());
        }
    };
    commands::dispatch(&cli.command).await
}
