// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Validation of user-supplied GitHub account identifiers.
//!
//! The validator is a pure predicate: it performs no I/O, keeps no state, and
//! always yields the same verdict for the same input. Rules are applied in
//! order and the first failure wins, so callers receive a single
//! distinguishing reason per rejected input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Maximum length of a GitHub account identifier in characters.
pub const MAX_USERNAME_LENGTH: usize = 39;

/// Accepts alphanumeric characters and interior hyphens, rejecting leading
/// and trailing hyphens. The quantifier bound keeps the total length within
/// [`MAX_USERNAME_LENGTH`] independently of the explicit length rule.
static USERNAME_PATTERN: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,37}[a-zA-Z0-9])?$",)
        .expect("username pattern must compile",)
},);

/// Validates a GitHub account identifier and returns its trimmed form.
///
/// Rules, applied in order:
///
/// 1. Surrounding whitespace is trimmed; an empty result is rejected.
/// 2. The trimmed value must contain between 1 and 39 characters.
/// 3. The trimmed value must consist of alphanumeric characters and interior
///    hyphens, without a leading or trailing hyphen.
///
/// # Errors
///
/// Returns [`Error::Validation`] with a human-readable reason when any rule
/// fails.
///
/// # Examples
///
/// ```
/// use grit::validate_username;
///
/// let username = validate_username("  octocat  ",).expect("valid username",);
/// assert_eq!(username, "octocat");
/// assert!(validate_username("-octocat").is_err());
/// ```
pub fn validate_username(input: &str,) -> Result<String, Error,>
{
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::validation("Username cannot be empty",),);
    }

    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(Error::validation("GitHub username must be between 1-39 characters",),);
    }

    if !USERNAME_PATTERN.is_match(trimmed,) {
        return Err(Error::validation(
            "Username can only contain alphanumeric characters and hyphens, and cannot start or \
             end with a hyphen",
        ),);
    }

    Ok(trimmed.to_owned(),)
}
