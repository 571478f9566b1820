#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type returned by the validator, orchestrator, and boundary.
///
/// The fetch-related variants form a closed taxonomy: every upstream outcome
/// maps to exactly one of them, and each variant maps to exactly one boundary
/// status code via [`Error::boundary_status_code`]. No variant is retried
/// automatically anywhere in the crate.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Returned when user input violates validation rules before any network
    /// call is made.
    #[error("{message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Returned when the GitHub account does not exist.
    #[error("GitHub user \"{username}\" not found")]
    NotFound {
        /// Account identifier that failed the existence lookup.
        username: String
    },
    /// Returned when GitHub rejects the repository listing with HTTP 403.
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,
    /// Returned for any other non-success status from the GitHub API.
    #[error("GitHub API error: {status}")]
    Upstream {
        /// HTTP status code reported by the upstream service.
        status: u16
    },
    /// Returned when the repository listing body is not a JSON array.
    #[error("Invalid response format from GitHub")]
    MalformedUpstream,
    /// Returned when a remote call exceeds its time budget.
    #[error("Request to GitHub timed out. Please try again.")]
    Timeout,
    /// Wraps transport-level failures that carry no HTTP status.
    #[error("Server error: {message}")]
    Transport {
        /// Human readable message describing the transport failure.
        message: String
    },
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps serialization errors when writing JSON output.
    #[error("failed to serialize output: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a transport error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the transport failure.
    pub fn transport<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Transport {
            message: message.into()
        }
    }

    /// Constructs a not-found error for the provided account identifier.
    pub fn not_found<U>(username: U) -> Self
    where
        U: Into<String>
    {
        Self::NotFound {
            username: username.into()
        }
    }

    /// Returns the HTTP status code the boundary reports for this error.
    ///
    /// The mapping is deterministic: validation failures are client errors,
    /// upstream misbehavior surfaces as a bad gateway, timeouts as a gateway
    /// timeout, and everything without a sharper classification as an
    /// internal error.
    pub fn boundary_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::RateLimited => 429,
            Self::Upstream { .. } | Self::MalformedUpstream => 502,
            Self::Timeout => 504,
            Self::Transport { .. } | Self::Io { .. } | Self::Parse { .. } | Self::Serialize { .. } => 500
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
