// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Utilities for fetching and summarizing GitHub repository creation
//! timelines.
//!
//! The library validates account identifiers, orchestrates the two-stage
//! fetch against the GitHub API, normalizes the raw repository records into
//! trusted internal representations, and aggregates them into per-year
//! creation statistics. A thin actix-web boundary exposes the pipeline as a
//! single HTTP endpoint. All public APIs are documented with invariants,
//! error semantics, and minimal examples.

mod config;
mod error;
mod fetch;
mod normalizer;
mod server;
mod summary;
mod username;

pub use config::{AppConfig, load_config, parse_config};
pub use error::{Error, io_error};
pub use fetch::{RepositoriesResponse, build_client, fetch_repositories};
pub use normalizer::{Repository, normalize};
pub use server::{AppState, get_repositories, run_server};
pub use summary::{YearBucket, YearSummary, summarize};
pub use username::{MAX_USERNAME_LENGTH, validate_username};
