//! `casegen publish` command.

use crate::adapters::live::jira::JiraTickets;
use crate::adapters::live::qmetry::QmetryRepository;
use crate::commands::generate;
use crate::config::Config;
use crate::publish::{publish_cases, PublishReport};
use crate::session::Session;

/// Execute the `publish` command.
///
/// Runs the full pipeline: fetch, extract, synthesize, then upload the
/// cases into a folder named after the ticket. Partial failure is
/// reported but still counts as success; a run where no case was
/// accepted fails.
///
/// # Errors
///
/// Returns an error string when configuration, authentication, ticket
/// retrieval, or folder creation fails, or when every upload failed.
pub async fn run(ticket_key: &str) -> Result<(), String> {
    let config = Config::from_env().map_err(|err| err.to_string())?;
    let session = Session::open(&config).await.map_err(|err| err.to_string())?;

    let tickets = JiraTickets::new(session.clone());
    let (ticket, cases) =
        generate::synthesize_for_ticket(&tickets, ticket_key).await.map_err(|err| err.to_string())?;
    if cases.is_empty() {
        println!("No test cases could be generated from the description of {}.", ticket.key);
        return Ok(());
    }

    let repo = QmetryRepository::new(session);
    let report =
        publish_cases(&repo, &cases, &ticket.key).await.map_err(|err| err.to_string())?;
    report_outcome(&ticket.key, &report)
}

/// Renders the publish outcome for the user.
///
/// # Errors
///
/// Returns an error string when zero uploads were accepted.
fn report_outcome(ticket_key: &str, report: &PublishReport) -> Result<(), String> {
    if report.succeeded() {
        println!("Added {} test case(s) to folder {ticket_key}.", report.success_count);
    }
    if report.failed_count > 0 {
        println!("Failed to add {} test case(s):", report.failed_count);
        for failure in &report.failures {
            println!("  {}: {}", failure.case_id, failure.error);
        }
    }
    if report.succeeded() {
        Ok(())
    } else {
        Err(format!(
            "no test cases were accepted by the remote system ({} failed)",
            report.failed_count
        ))
    }
}
