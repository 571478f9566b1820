// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Application configuration loaded from YAML documents.
//!
//! The configuration keeps every knob optional: a missing file section falls
//! back to the documented default, so an empty document is a valid
//! configuration. Invariants are checked once at parse time; downstream code
//! can rely on non-empty addresses and positive time budgets.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::{self, Error};

/// Default bind address for the boundary HTTP server.
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
/// Default GitHub API base URL.
const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default time budget for each individual GitHub API call, in seconds.
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 5;
/// Default end-to-end time budget the boundary wraps around the whole fetch,
/// in seconds. Independent of the per-call budget.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the server and CLI.
///
/// # Examples
///
/// ```
/// use grit::{AppConfig, parse_config};
///
/// let config = parse_config("github_api_url: https://github.example.com/api/v3",)
///     .expect("valid configuration",);
/// assert_eq!(config.github_api_url, "https://github.example.com/api/v3");
/// assert_eq!(config.bind_address, AppConfig::default().bind_address);
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq, Eq,)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig
{
    /// Address the boundary HTTP server binds to.
    pub bind_address: String,

    /// Base URL of the GitHub API. Overridable for GitHub Enterprise hosts.
    pub github_api_url: String,

    /// Optional personal token attached to outbound API calls.
    pub github_token: Option<String,>,

    /// Time budget for each individual GitHub API call, in seconds.
    pub call_timeout_secs: u64,

    /// End-to-end time budget for one boundary request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig
{
    fn default() -> Self
    {
        Self {
            bind_address:         DEFAULT_BIND_ADDRESS.to_owned(),
            github_api_url:       DEFAULT_API_URL.to_owned(),
            github_token:         None,
            call_timeout_secs:    DEFAULT_CALL_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig
{
    /// Returns the per-call time budget as a [`Duration`].
    pub fn call_timeout(&self,) -> Duration
    {
        Duration::from_secs(self.call_timeout_secs,)
    }

    /// Returns the end-to-end boundary time budget as a [`Duration`].
    pub fn request_timeout(&self,) -> Duration
    {
        Duration::from_secs(self.request_timeout_secs,)
    }
}

/// Loads the application configuration from the provided YAML file path.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read, the YAML cannot be
/// deserialized, or the configuration violates invariants.
pub fn load_config(path: &Path,) -> Result<AppConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_config(&contents,)
}

/// Parses the application configuration from a YAML document string.
///
/// This function is suitable for unit tests and higher-level callers that
/// already obtained the configuration contents.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded
/// and [`Error::Validation`](Error::Validation) when invariants are violated.
pub fn parse_config(contents: &str,) -> Result<AppConfig, Error,>
{
    if contents.trim().is_empty() {
        return Ok(AppConfig::default(),);
    }

    let config: AppConfig = serde_yaml::from_str(contents,)?;
    validate_config(&config,)?;
    Ok(config,)
}

/// Checks configuration invariants after deserialization.
fn validate_config(config: &AppConfig,) -> Result<(), Error,>
{
    if config.bind_address.trim().is_empty() {
        return Err(Error::validation("bind_address cannot be empty",),);
    }
    if config.github_api_url.trim().is_empty() {
        return Err(Error::validation("github_api_url cannot be empty",),);
    }
    if config.call_timeout_secs == 0 {
        return Err(Error::validation("call_timeout_secs must be greater than zero",),);
    }
    if config.request_timeout_secs == 0 {
        return Err(Error::validation("request_timeout_secs must be greater than zero",),);
    }

    Ok((),)
}

#[cfg(test)]
mod tests
{
    use std::io::Write;

    use super::{AppConfig, load_config, parse_config};
    use crate::error::Error;

    #[test]
    fn empty_document_yields_defaults()
    {
        let config = parse_config("",).expect("expected parse success",);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.github_token, None);
    }

    #[test]
    fn default_time_budgets_match_contract()
    {
        let config = AppConfig::default();
        assert_eq!(config.call_timeout().as_secs(), 5);
        assert_eq!(config.request_timeout().as_secs(), 10);
    }

    #[test]
    fn overrides_are_honored()
    {
        let yaml = r"
            bind_address: 0.0.0.0:9090
            github_api_url: https://github.example.com/api/v3
            github_token: ghp_example
            call_timeout_secs: 3
            request_timeout_secs: 20
        ";

        let config = parse_config(yaml,).expect("expected parse success",);
        assert_eq!(config.bind_address, "0.0.0.0:9090");
        assert_eq!(config.github_api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github_token.as_deref(), Some("ghp_example"));
        assert_eq!(config.call_timeout_secs, 3);
        assert_eq!(config.request_timeout_secs, 20);
    }

    #[test]
    fn rejects_empty_bind_address()
    {
        let error = parse_config("bind_address: '   '",).expect_err("expected rejection",);
        match error {
            Error::Validation {
                message,
            } => assert_eq!(message, "bind_address cannot be empty"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_call_timeout()
    {
        let error = parse_config("call_timeout_secs: 0",).expect_err("expected rejection",);
        match error {
            Error::Validation {
                message,
            } => assert_eq!(message, "call_timeout_secs must be greater than zero"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_request_timeout()
    {
        let error = parse_config("request_timeout_secs: 0",).expect_err("expected rejection",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn rejects_unknown_fields()
    {
        let result = parse_config("unexpected_field: value",);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn load_config_reads_configuration_from_disk()
    {
        let mut file = tempfile::NamedTempFile::new().expect("expected temp file",);
        write!(file, "bind_address: 127.0.0.1:3000\ncall_timeout_secs: 2\n")
            .expect("expected write to succeed",);

        let config = load_config(file.path(),).expect("expected load to succeed",);
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.call_timeout_secs, 2);
    }

    #[test]
    fn load_config_reports_io_errors()
    {
        let path = std::path::Path::new("/nonexistent/config.yaml",);
        let error = load_config(path,).expect_err("expected io error",);
        assert!(matches!(error, Error::Io { .. }));
    }
}
