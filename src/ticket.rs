//! Ticket model and retrieval with bounded retry.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ports::tracker::TicketSource;
use crate::retry::RetryPolicy;

/// A unit of work fetched from the issue tracker. Immutable once
/// fetched; owned by the caller for one pipeline run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Tracker-assigned key, e.g. `PROJ-123`.
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Raw description text; may contain markup.
    pub description: String,
}

/// Fetches a ticket by key, retrying transient failures per `policy`.
///
/// The key is trimmed of surrounding whitespace before it reaches the
/// tracker. A clean not-found response is terminal and never retried;
/// only transport failures consume retry attempts.
///
/// # Errors
///
/// `NotFound` when the tracker has no such ticket, `Authentication` when
/// credentials are rejected, `Transport` when the retry budget is
/// exhausted on network failures.
pub async fn fetch_ticket(
    source: &dyn TicketSource,
    key: &str,
    policy: &RetryPolicy,
) -> Result<Ticket, Error> {
    let key = key.trim();
    policy.run(|| source.fetch(key)).await
}
