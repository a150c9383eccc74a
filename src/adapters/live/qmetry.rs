//! Live `TestRepository` adapter for the test-management plugin API.
//!
//! Folder creation goes through the plugin servlet; case creation goes
//! through the plugin's own REST namespace. Both reuse the session's
//! header set and basic credentials.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, RemoteError};
use crate::ports::repository::{CaseUpload, FolderFuture, FolderId, TestRepository, UploadFuture};
use crate::session::Session;

/// Folder-creation endpoint exposed by the test-management plugin.
const FOLDERS_PATH: &str =
    "/plugins/servlet/ac/com.infostretch.QmetryTestManager/qtm4j-test-management/api/folders";
/// Test-case creation endpoint. The remote API has no bulk insert.
const TESTCASE_PATH: &str = "/rest/qtm4j/1.0/testcase";

/// Test repository backed by the QMetry-for-tracker plugin.
pub struct QmetryRepository {
    session: Session,
}

impl QmetryRepository {
    /// Creates a repository over an already-authenticated session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

/// Folder-creation request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FolderRequest<'a> {
    name: &'a str,
    project_id: &'a str,
    parent_id: i64,
    #[serde(rename = "type")]
    folder_type: &'a str,
}

/// The only field consumed from the folder-creation response.
#[derive(Deserialize)]
struct FolderResponse {
    id: i64,
}

/// Full case-creation body: the upload payload plus project identity.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CaseRequest<'a> {
    #[serde(flatten)]
    upload: &'a CaseUpload,
    project_id: &'a str,
    project_key: &'a str,
}

impl TestRepository for QmetryRepository {
    fn create_folder(&self, name: &str) -> FolderFuture<'_> {
        let name = name.to_string();
        Box::pin(async move {
            // The remote system requires a fresh authentication probe
            // immediately preceding state-changing calls.
            self.session.probe().await?;

            let body = FolderRequest {
                name: &name,
                project_id: self.session.project_id(),
                parent_id: -1,
                folder_type: "TEST_CASE",
            };
            let response =
                self.session.post(&self.session.url(FOLDERS_PATH)).json(&body).send().await?;
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status == StatusCode::OK || status == StatusCode::CREATED {
                let folder: FolderResponse = serde_json::from_str(&text).map_err(|err| {
                    Error::Transport(format!("invalid folder response: {err}; body: {text}"))
                })?;
                info!(folder = folder.id, %name, "created remote folder");
                return Ok(FolderId(folder.id));
            }
            Err(Error::RemoteValidation(RemoteError::from_response(status.as_u16(), &text)))
        })
    }

    fn create_case(&self, upload: &CaseUpload) -> UploadFuture<'_> {
        // Serialize before entering the future so it owns its payload.
        let body = serde_json::to_value(CaseRequest {
            upload,
            project_id: self.session.project_id(),
            project_key: self.session.project_key(),
        });
        Box::pin(async move {
            let body = body
                .map_err(|err| Error::Transport(format!("failed to encode test case: {err}")))?;
            let response =
                self.session.post(&self.session.url(TESTCASE_PATH)).json(&body).send().await?;
            let status = response.status();
            if status == StatusCode::OK || status == StatusCode::CREATED {
                return Ok(());
            }
            let text = response.text().await.unwrap_or_default();
            Err(Error::RemoteValidation(RemoteError::from_response(status.as_u16(), &text)))
        })
    }
}
