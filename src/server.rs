// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Boundary HTTP surface exposing the fetch pipeline.
///
/// A single endpoint, `GET /api/github?username=<id>`, wraps the orchestrator
/// and normalizer. The handler re-checks the identifier length before any
/// network call is made, then runs the full validator; it does not trust that
/// validation happened upstream. The whole fetch is additionally bounded by
/// the configured end-to-end timeout, independent of the per-call budgets.
use actix_web::{App, HttpResponse, HttpServer, ResponseError, http::StatusCode, web};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::info;

use crate::{
    config::AppConfig,
    error::Error,
    fetch::{RepositoriesResponse, build_client, fetch_repositories},
    username::{MAX_USERNAME_LENGTH, validate_username},
};

/// Shared state handed to every request handler.
///
/// The GitHub client is built once at startup; per-request data structures
/// are constructed fresh inside the handler, so concurrent requests need no
/// coordination.
pub struct AppState
{
    /// Shared GitHub API client.
    pub octocrab: Octocrab,
    /// Application configuration the server was started with.
    pub config:   AppConfig,
}

/// Query parameters accepted by the repositories endpoint.
#[derive(Debug, Deserialize,)]
pub struct RepositoriesQuery
{
    /// Account identifier supplied by the caller.
    pub username: Option<String,>,
}

/// Error body returned for every failure.
#[derive(Serialize,)]
struct ErrorResponse
{
    error: String,
}

impl ResponseError for Error
{
    fn status_code(&self,) -> StatusCode
    {
        StatusCode::from_u16(self.boundary_status_code(),)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR,)
    }

    fn error_response(&self,) -> HttpResponse
    {
        HttpResponse::build(self.status_code(),).json(ErrorResponse {
            error: self.to_string(),
        },)
    }
}

/// GET /api/github?username=<id>
///
/// Returns `200 {"repositories": [...]}` on success. Failures map
/// deterministically onto status codes: `400` for missing, too-long, or
/// pattern-violating identifiers, `404` for unknown accounts, `429` when rate
/// limited, `502` for upstream errors and malformed payloads, `504` for
/// timeouts, and `500` for unclassified failures. Error bodies are
/// `{"error": "<message>"}`.
pub async fn get_repositories(
    state: web::Data<AppState,>,
    query: web::Query<RepositoriesQuery,>,
) -> Result<HttpResponse, Error,>
{
    let Some(raw_username,) = query.username.as_deref() else {
        return Err(Error::validation("Username is required",),);
    };

    if raw_username.trim().chars().count() > MAX_USERNAME_LENGTH {
        return Err(Error::validation("Username is too long",),);
    }

    let username = validate_username(raw_username,)?;

    let fetched = timeout(
        state.config.request_timeout(),
        fetch_repositories(&state.octocrab, &username, state.config.call_timeout(),),
    )
    .await;
    let repositories = match fetched {
        Err(_elapsed,) => return Err(Error::Timeout,),
        Ok(result,) => result?,
    };

    Ok(HttpResponse::Ok().json(RepositoriesResponse {
        repositories,
    },),)
}

/// Runs the boundary HTTP server until shutdown.
///
/// # Errors
///
/// Returns [`Error::Transport`] when the GitHub client cannot be built, the
/// bind address is unavailable, or the server fails while running.
pub async fn run_server(config: AppConfig,) -> Result<(), Error,>
{
    let octocrab = build_client(&config,)?;
    let bind_address = config.bind_address.clone();
    let state = web::Data::new(AppState {
        octocrab,
        config,
    },);

    info!("listening on {}", bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone(),)
            .route("/api/github", web::get().to(get_repositories,),)
    },)
    .bind(bind_address.as_str(),)
    .map_err(|error| Error::transport(format!("failed to bind {bind_address}: {error}"),),)?
    .run()
    .await
    .map_err(|error| Error::transport(format!("server error: {error}"),),)
}
