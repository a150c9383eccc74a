//! `casegen generate` command.

use crate::adapters::live::jira::JiraTickets;
use crate::config::Config;
use crate::error::Error;
use crate::ports::tracker::TicketSource;
use crate::requirements;
use crate::retry::RetryPolicy;
use crate::session::Session;
use crate::testcase::{self, TestCase};
use crate::ticket::{self, Ticket};

/// Execute the `generate` command.
///
/// # Errors
///
/// Returns an error string when configuration, authentication, or ticket
/// retrieval fails.
pub async fn run(ticket_key: &str, json: bool) -> Result<(), String> {
    let config = Config::from_env().map_err(|err| err.to_string())?;
    let session = Session::open(&config).await.map_err(|err| err.to_string())?;
    let tickets = JiraTickets::new(session);

    let (ticket, cases) =
        synthesize_for_ticket(&tickets, ticket_key).await.map_err(|err| err.to_string())?;
    if cases.is_empty() {
        println!("No test cases could be generated from the description of {}.", ticket.key);
        return Ok(());
    }

    if json {
        let rendered = serde_json::to_string_pretty(&cases).map_err(|err| err.to_string())?;
        println!("{rendered}");
    } else {
        print_cases(&ticket, &cases);
    }
    Ok(())
}

/// Front half of the pipeline: fetch the ticket, extract requirement
/// lines, and synthesize test cases.
///
/// # Errors
///
/// Propagates retrieval errors from the ticket source.
pub async fn synthesize_for_ticket(
    source: &dyn TicketSource,
    key: &str,
) -> Result<(Ticket, Vec<TestCase>), Error> {
    let ticket = ticket::fetch_ticket(source, key, &RetryPolicy::default()).await?;
    let requirements = requirements::extract(&ticket.description);
    let cases = testcase::synthesize(&requirements);
    Ok((ticket, cases))
}

fn print_cases(ticket: &Ticket, cases: &[TestCase]) {
    println!("Test cases for {}: {}", ticket.key, ticket.summary);
    for case in cases {
        println!();
        println!("{} [{} / {}] {}", case.id, case.case_type, case.priority, case.summary);
        for (index, step) in case.steps.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
        println!("  Expected: {}", case.expected_result);
    }
}
