// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Remote fetch orchestration against the GitHub API.
///
/// Performs the two-stage dependent call sequence (account existence check,
/// then repository listing) and classifies every failure mode into the closed
/// error taxonomy of [`crate::Error`]. The calls are strictly sequential: the
/// listing is only meaningful once the account is known to exist, and a
/// nonexistent account must surface as a precise not-found error rather than
/// an ambiguous empty list. No retries are performed here; a failure is
/// surfaced once, immediately.
use std::time::Duration;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    error::Error,
    normalizer::{Repository, normalize},
};

/// Success payload returned by the boundary and the CLI.
#[derive(Debug, Serialize, Deserialize, Clone,)]
pub struct RepositoriesResponse
{
    /// Normalized repositories, newest creation first.
    pub repositories: Vec<Repository,>,
}

/// Query parameters for the repository listing call: public repositories
/// only, newest creation first, a single page of up to 100 entries.
#[derive(Debug, Serialize,)]
struct ListQuery
{
    #[serde(rename = "type")]
    visibility: &'static str,
    per_page:   u8,
    sort:       &'static str,
    direction:  &'static str,
}

impl Default for ListQuery
{
    fn default() -> Self
    {
        Self {
            visibility: "public", per_page: 100, sort: "created", direction: "desc",
        }
    }
}

/// Builds the GitHub client from the application configuration.
///
/// The client is constructed once and shared across requests; it carries the
/// configured base URI and, when present, the personal token.
///
/// # Errors
///
/// Returns [`Error::Transport`] when the base URI is invalid or the client
/// cannot be assembled.
pub fn build_client(config: &AppConfig,) -> Result<Octocrab, Error,>
{
    let mut builder = Octocrab::builder()
        .base_uri(config.github_api_url.as_str(),)
        .map_err(|error| Error::transport(format!("invalid GitHub API base URL: {error}"),),)?;

    if let Some(token,) = config.github_token.as_ref() {
        builder = builder.personal_token(token.clone(),);
    }

    builder
        .build()
        .map_err(|error| Error::transport(format!("failed to build GitHub client: {error}"),),)
}

/// Fetches and normalizes the public, non-forked repositories of an account.
///
/// The caller is expected to have validated `username` already; the boundary
/// independently re-checks the length limit before invoking this function.
/// Each of the two remote calls is bounded by `per_call_timeout`; expiry
/// cancels the in-flight call and surfaces [`Error::Timeout`].
///
/// # Errors
///
/// * [`Error::NotFound`] - the account existence check returned HTTP 404.
/// * [`Error::RateLimited`] - the repository listing returned HTTP 403.
/// * [`Error::Upstream`] - any other non-success status from either call.
/// * [`Error::MalformedUpstream`] - the listing body was not a JSON array.
/// * [`Error::Timeout`] - either call exceeded `per_call_timeout`.
/// * [`Error::Transport`] - any other transport-level failure.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use grit::{AppConfig, build_client, fetch_repositories};
///
/// # async fn example() -> Result<(), grit::Error> {
/// let config = AppConfig::default();
/// let octocrab = build_client(&config,)?;
/// let repositories =
///     fetch_repositories(&octocrab, "octocat", Duration::from_secs(5,),).await?;
/// println!("{} repositories", repositories.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_repositories(
    octocrab: &Octocrab,
    username: &str,
    per_call_timeout: Duration,
) -> Result<Vec<Repository,>, Error,>
{
    debug!("checking GitHub account {}", username);
    let lookup = timeout(
        per_call_timeout,
        octocrab.get::<Value, _, _,>(format!("/users/{username}"), None::<&(),>,),
    )
    .await;
    match lookup {
        Err(_elapsed,) => return Err(Error::Timeout,),
        Ok(Err(error,),) => return Err(classify_account_error(error, username,),),
        Ok(Ok(_,),) => {}
    }

    debug!("listing public repositories for {}", username);
    let listing = timeout(
        per_call_timeout,
        octocrab
            .get::<Value, _, _,>(format!("/users/{username}/repos"), Some(&ListQuery::default(),),),
    )
    .await;
    let body = match listing {
        Err(_elapsed,) => return Err(Error::Timeout,),
        Ok(Err(error,),) => return Err(classify_listing_error(error,),),
        Ok(Ok(body,),) => body,
    };

    let Some(entries,) = body.as_array() else {
        return Err(Error::MalformedUpstream,);
    };

    let repositories = normalize(entries,);
    info!("fetched {} repositories for {}", repositories.len(), username);
    Ok(repositories,)
}

/// Classifies a failed account existence check.
fn classify_account_error(error: octocrab::Error, username: &str,) -> Error
{
    match error {
        octocrab::Error::GitHub {
            source, ..
        } => classify_account_status(source.status_code.as_u16(), username,),
        other => classify_transport(other,),
    }
}

/// Classifies a failed repository listing call.
fn classify_listing_error(error: octocrab::Error,) -> Error
{
    match error {
        octocrab::Error::GitHub {
            source, ..
        } => classify_listing_status(source.status_code.as_u16(),),
        other => classify_transport(other,),
    }
}

fn classify_account_status(status: u16, username: &str,) -> Error
{
    if status == 404 { Error::not_found(username,) } else { Error::Upstream { status, } }
}

fn classify_listing_status(status: u16,) -> Error
{
    if status == 403 { Error::RateLimited } else { Error::Upstream { status, } }
}

/// Maps transport-level failures that carry no upstream status.
fn classify_transport(error: octocrab::Error,) -> Error
{
    Error::transport(error.to_string(),)
}
