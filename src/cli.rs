//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `casegen`.
#[derive(Debug, Parser)]
#[command(name = "casegen", version, about = "Generate and publish test cases from tracker tickets")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a ticket and synthesize test cases from its description.
    Generate {
        /// Tracker ticket key, e.g. `PROJ-123`.
        ticket: String,
        /// Print the synthesized cases as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Synthesize test cases for a ticket and upload them to the test repository.
    Publish {
        /// Tracker ticket key, e.g. `PROJ-123`.
        ticket: String,
    },
    /// Draft test cases from a free-text user story via the language model.
    Draft {
        /// The user story text.
        story: String,
    },
}
