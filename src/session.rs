//! Authenticated HTTP session shared by all remote calls in one run.
//!
//! A `Session` only exists after a successful authentication probe, so
//! dependent components never have to check an "unauthenticated" state.
//! After construction the session is read-only; clones share the same
//! underlying connection pool.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use tracing::info;

use crate::config::Config;
use crate::error::Error;

/// Bounded timeout applied to every outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Lightweight "who am I" endpoint used as the authentication probe.
const MYSELF_PATH: &str = "/rest/api/2/myself";

/// A validated, process-scoped HTTP context: base URL, credential pair,
/// and the fixed header set every remote call carries.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
    project_id: String,
    project_key: String,
}

impl Session {
    /// Opens a session by probing the tracker with basic credentials.
    ///
    /// One session is created per pipeline invocation and reused by both
    /// retrieval and publishing; it is never persisted.
    ///
    /// # Errors
    ///
    /// `Error::Authentication` when the probe is rejected,
    /// `Error::Transport` when the tracker is unreachable,
    /// `Error::Configuration` when the HTTP client cannot be built.
    pub async fn open(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(default_headers(config)?)
            .build()
            .map_err(|err| Error::Configuration(format!("failed to build HTTP client: {err}")))?;

        let session = Self {
            client,
            base_url: config.tracker_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
            project_id: config.qmetry_project_id.clone(),
            project_key: config.qmetry_project_key.clone(),
        };
        session.probe().await?;
        info!(url = %session.base_url, "session authenticated");
        Ok(session)
    }

    /// Re-runs the authentication probe.
    ///
    /// The remote system requires a fresh probe immediately before
    /// state-changing calls, so publishers call this again even on an
    /// already-validated session.
    ///
    /// # Errors
    ///
    /// `Error::Authentication` on a non-2xx probe response,
    /// `Error::Transport` on network failure.
    pub async fn probe(&self) -> Result<(), Error> {
        let response = self.get(&self.url(MYSELF_PATH)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Authentication {
            detail: format!("auth probe rejected with status {}: {body}", status.as_u16()),
        })
    }

    /// Builds an authenticated GET request.
    #[must_use]
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).basic_auth(&self.email, Some(&self.api_token))
    }

    /// Builds an authenticated POST request.
    #[must_use]
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).basic_auth(&self.email, Some(&self.api_token))
    }

    /// Joins a path onto the session base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Numeric project identifier in the test-management system.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Project key in the test-management system.
    #[must_use]
    pub fn project_key(&self) -> &str {
        &self.project_key
    }
}

/// The fixed header set attached to every remote call: content
/// negotiation, the anti-forgery bypass marker, and the test-management
/// API and project keys.
fn default_headers(config: &Config) -> Result<HeaderMap, Error> {
    let header = |name: &'static str, value: &str| -> Result<(&'static str, HeaderValue), Error> {
        HeaderValue::from_str(value)
            .map(|parsed| (name, parsed))
            .map_err(|_| Error::Configuration(format!("{name} value contains invalid characters")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("X-Atlassian-Token", HeaderValue::from_static("no-check"));
    let (name, value) = header("X-QMetry-API-Key", &config.qmetry_api_key)?;
    headers.insert(name, value);
    let (name, value) = header("X-QMetry-Project-Key", &config.qmetry_project_key)?;
    headers.insert(name, value);
    Ok(headers)
}
