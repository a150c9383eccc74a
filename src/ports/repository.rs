//! Test repository port for the remote test-management system, plus the
//! wire-shaped upload payloads the remote API accepts.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::error::Error;
use crate::testcase::{clip, CaseType, Priority, TestCase};

/// Hard transport limit on the summary field, enforced client-side.
const SUMMARY_LIMIT: usize = 255;
/// Hard transport limit on the description field.
const DESCRIPTION_LIMIT: usize = 1000;
/// Hard transport limit on the precondition field.
const PRECONDITION_LIMIT: usize = 1000;

/// Numeric identifier of a remote folder, valid for one publish run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FolderId(pub i64);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One numbered step in the upload payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStep {
    /// The step text.
    pub step_details: String,
    /// Expected result, copied from the owning test case.
    pub expected_result: String,
    /// 1-based step index.
    pub id: usize,
    /// UI state flag; always sent unchecked.
    pub is_checked: bool,
    /// UI state flag; always sent expanded.
    pub is_expanded: bool,
}

/// The wire shape of one test case upload, with transport limits already
/// applied. Project identity fields are appended by the live adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpload {
    /// Summary, capped at 255 characters.
    pub summary: String,
    /// Joined steps, capped at 1000 characters.
    pub description: String,
    /// Expected result mapped to the precondition field, capped at 1000.
    pub precondition: String,
    /// Target folder, serialized as a string per the remote contract.
    pub folder_id: String,
    /// Case priority.
    pub priority: Priority,
    /// Remote workflow status; new cases are always drafts.
    pub status: String,
    /// Case category.
    #[serde(rename = "type")]
    pub case_type: CaseType,
    /// Per-case numbered steps.
    pub steps: Vec<CaseStep>,
}

impl CaseUpload {
    /// Builds the upload payload for one test case.
    ///
    /// Steps are exploded into numbered step objects and the hard field
    /// limits are applied here, before any upload attempt.
    #[must_use]
    pub fn from_case(case: &TestCase, folder: FolderId) -> Self {
        let steps = case
            .steps
            .iter()
            .filter(|step| !step.trim().is_empty())
            .enumerate()
            .map(|(index, step)| CaseStep {
                step_details: step.trim().to_string(),
                expected_result: case.expected_result.clone(),
                id: index + 1,
                is_checked: false,
                is_expanded: true,
            })
            .collect();

        Self {
            summary: clip(&case.summary, SUMMARY_LIMIT).to_string(),
            description: clip(&case.steps.join("\n"), DESCRIPTION_LIMIT).to_string(),
            precondition: clip(&case.expected_result, PRECONDITION_LIMIT).to_string(),
            folder_id: folder.0.to_string(),
            priority: case.priority,
            status: "Draft".to_string(),
            case_type: case.case_type,
            steps,
        }
    }
}

/// Boxed future alias for folder resolution.
pub type FolderFuture<'a> = Pin<Box<dyn Future<Output = Result<FolderId, Error>> + Send + 'a>>;
/// Boxed future alias for a single case upload.
pub type UploadFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// Creates folders and test cases in the remote test-management system.
pub trait TestRepository: Send + Sync {
    /// Resolves a folder named after the ticket, creating it remotely.
    ///
    /// The remote system does not deduplicate folders by name, so
    /// repeating a publish for the same ticket creates a sibling folder.
    ///
    /// # Errors
    ///
    /// `Error::Authentication` when the pre-create probe is rejected,
    /// `Error::RemoteValidation` when the create call returns a non-2xx
    /// status, `Error::Transport` on network failure.
    fn create_folder(&self, name: &str) -> FolderFuture<'_>;

    /// Creates one test case in the remote system.
    ///
    /// # Errors
    ///
    /// `Error::RemoteValidation` when the remote rejects the payload,
    /// `Error::Transport` on network failure or timeout.
    fn create_case(&self, upload: &CaseUpload) -> UploadFuture<'_>;
}
