//! Live `TicketSource` adapter for the tracker REST API.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::ports::tracker::{TicketFuture, TicketSource};
use crate::session::Session;
use crate::ticket::Ticket;

/// Ticket source backed by the tracker's issue REST endpoint.
pub struct JiraTickets {
    session: Session,
}

impl JiraTickets {
    /// Creates a ticket source over an already-authenticated session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

/// The slice of the issue response the pipeline consumes.
#[derive(Deserialize)]
struct IssueResponse {
    key: String,
    fields: IssueFields,
}

/// Consumed issue fields; the description may be absent on the remote side.
#[derive(Deserialize)]
struct IssueFields {
    summary: String,
    description: Option<String>,
}

impl TicketSource for JiraTickets {
    fn fetch(&self, key: &str) -> TicketFuture<'_> {
        let key = key.trim().to_string();
        Box::pin(async move {
            let url =
                self.session.url(&format!("/rest/api/2/issue/{key}?fields=summary,description"));
            debug!(%key, "fetching ticket");

            let response = self.session.get(&url).send().await?;
            let status = response.status();

            // Malformed keys are rejected by the tracker; both rejections
            // surface as not-found.
            if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
                return Err(Error::NotFound { key });
            }
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Authentication {
                    detail: format!(
                        "tracker rejected credentials with status {}: {body}",
                        status.as_u16()
                    ),
                });
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Transport(format!(
                    "tracker returned status {}: {body}",
                    status.as_u16()
                )));
            }

            let issue: IssueResponse = response
                .json()
                .await
                .map_err(|err| Error::Transport(format!("failed to decode issue response: {err}")))?;

            Ok(Ticket {
                key: issue.key,
                summary: issue.fields.summary,
                description: issue.fields.description.unwrap_or_default(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::IssueResponse;

    #[test]
    fn decodes_the_consumed_issue_fields() {
        let body = r#"{
            "key": "PROJ-7",
            "fields": {"summary": "Login fails", "description": "Verify login"},
            "expand": "ignored"
        }"#;
        let issue: IssueResponse = serde_json::from_str(body).unwrap();
        assert_eq!(issue.key, "PROJ-7");
        assert_eq!(issue.fields.summary, "Login fails");
        assert_eq!(issue.fields.description.as_deref(), Some("Verify login"));
    }

    #[test]
    fn tolerates_a_missing_description() {
        let body = r#"{"key": "PROJ-8", "fields": {"summary": "No body"}}"#;
        let issue: IssueResponse = serde_json::from_str(body).unwrap();
        assert!(issue.fields.description.is_none());
    }
}
