//! Batch publishing of synthesized test cases into the remote repository.
//!
//! Folder resolution is fatal when it fails; individual case uploads are
//! not. Every submitted case lands in exactly one of the two counters,
//! and a failed upload never aborts its siblings.

use tracing::{info, warn};

use crate::error::Error;
use crate::ports::repository::{CaseUpload, TestRepository};
use crate::testcase::TestCase;

/// Maximum number of test cases per client-side upload chunk.
pub const CHUNK_SIZE: usize = 5;

/// One failed upload, kept for user-visible reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// Identifier of the test case that failed.
    pub case_id: String,
    /// What went wrong, including remote status and body when available.
    pub error: Error,
}

/// Aggregate outcome of one publish run. Partial failure is an explicit
/// result shape, not an error: callers check the counters and report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Uploads accepted by the remote system.
    pub success_count: usize,
    /// Uploads rejected or lost to network failure.
    pub failed_count: usize,
    /// Per-item failure detail, in submission order.
    pub failures: Vec<UploadFailure>,
}

impl PublishReport {
    /// Whether the publish as a whole counts as succeeded.
    ///
    /// True as soon as at least one case was accepted, even alongside
    /// failures.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.success_count > 0
    }
}

/// Publishes test cases into a folder named after the ticket.
///
/// Resolves the folder first, then uploads the cases in consecutive
/// chunks of at most [`CHUNK_SIZE`], strictly in input order. Each upload
/// is judged independently; failures are recorded and processing
/// continues.
///
/// # Errors
///
/// `Error::Authentication` when the pre-create probe fails and
/// `Error::RemoteValidation` when folder creation is rejected; both
/// abort the publish before any upload is attempted. Per-case failures
/// are never returned as errors; they are reported in the
/// [`PublishReport`].
pub async fn publish_cases(
    repo: &dyn TestRepository,
    cases: &[TestCase],
    ticket_key: &str,
) -> Result<PublishReport, Error> {
    let folder = repo.create_folder(ticket_key).await?;
    info!(%folder, name = ticket_key, "remote folder ready");

    let mut report = PublishReport::default();
    for chunk in cases.chunks(CHUNK_SIZE) {
        for case in chunk {
            let upload = CaseUpload::from_case(case, folder);
            match repo.create_case(&upload).await {
                Ok(()) => report.success_count += 1,
                Err(error) => {
                    warn!(case = %case.id, "upload failed: {error}");
                    report.failed_count += 1;
                    report.failures.push(UploadFailure { case_id: case.id.clone(), error });
                }
            }
        }
    }

    info!(
        success = report.success_count,
        failed = report.failed_count,
        "publish complete"
    );
    Ok(report)
}
