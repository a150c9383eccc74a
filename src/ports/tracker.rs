//! Ticket source port for the external issue tracker.

use std::future::Future;
use std::pin::Pin;

use crate::error::Error;
use crate::ticket::Ticket;

/// Boxed future alias keeping [`TicketSource`] dyn-compatible.
pub type TicketFuture<'a> = Pin<Box<dyn Future<Output = Result<Ticket, Error>> + Send + 'a>>;

/// Fetches tickets from an external issue tracker.
///
/// Abstracting retrieval keeps the pipeline testable without touching a
/// real tracker API. Retrieval is read-only and safe to retry.
pub trait TicketSource: Send + Sync {
    /// Fetches a ticket by its tracker key.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` when the tracker reports no such ticket,
    /// `Error::Authentication` when credentials are rejected, and
    /// `Error::Transport` for timeouts and connection failures.
    fn fetch(&self, key: &str) -> TicketFuture<'_>;
}
