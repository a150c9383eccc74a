//! Environment-backed configuration, resolved once at startup.
//!
//! The configuration is read at the CLI edge and passed down as an
//! immutable value; core logic never reads process state directly.

use crate::error::Error;

/// Immutable configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the issue tracker, without a trailing slash.
    pub tracker_url: String,
    /// Account email for basic authentication.
    pub email: String,
    /// API token paired with the account email.
    pub api_token: String,
    /// API key for the test-management plugin.
    pub qmetry_api_key: String,
    /// Numeric project identifier in the test-management system.
    pub qmetry_project_id: String,
    /// Project key in the test-management system.
    pub qmetry_project_key: String,
}

impl Config {
    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` naming the first missing or empty
    /// variable. No network call is made before this check passes.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` naming the first missing or empty
    /// variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let require = |name: &str| -> Result<String, Error> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(Error::Configuration(format!("{name} is not set"))),
            }
        };

        Ok(Self {
            tracker_url: require("JIRA_URL")?.trim_end_matches('/').to_string(),
            email: require("JIRA_EMAIL")?,
            api_token: require("JIRA_API_TOKEN")?,
            qmetry_api_key: require("QMETRY_API_KEY")?,
            qmetry_project_id: require("QMETRY_PROJECT_ID")?,
            qmetry_project_key: require("QMETRY_PROJECT_KEY")?,
        })
    }
}
