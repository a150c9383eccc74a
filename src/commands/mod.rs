//! Command dispatch and handlers.

pub mod draft;
pub mod generate;
pub mod publish;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Generate { ticket, json } => generate::run(ticket, *json).await,
        Command::Publish { ticket } => publish::run(ticket).await,
        Command::Draft { story } => draft::run(story).await,
    }
}
