// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Aggregation of normalized repositories into per-year creation statistics.
//!
//! Buckets are recomputed on every call and never persisted. Year extraction
//! is UTC-based so the verdict does not depend on the host time zone.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::normalizer::Repository;

/// Repositories created within one calendar year, plus derived statistics.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq,)]
pub struct YearBucket
{
    /// Calendar year extracted from the creation timestamps.
    pub year:              i32,
    /// Number of repositories created that year.
    pub count:             usize,
    /// Share of the total repository count, in percent.
    pub percent_of_total:  f64,
    /// Count expressed as a percentage of the busiest year's count. Used for
    /// proportional visual widths; always in (0, 100] for non-empty buckets.
    pub bar_scale_percent: f64,
    /// Repositories belonging to this bucket, in input order.
    pub repositories:      Vec<Repository,>,
}

/// Year-bucketed statistics derived from a repository list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq,)]
pub struct YearSummary
{
    /// Total number of repositories across all buckets.
    pub total_count:       usize,
    /// Number of distinct years with at least one repository.
    pub active_year_count: usize,
    /// Average repositories per active year, rendered to one decimal place.
    /// `"0"` when there are no buckets.
    pub average_per_year:  String,
    /// Buckets ordered most recent year first. The ordering is a display
    /// contract, not an incidental artifact.
    pub buckets:           Vec<YearBucket,>,
}

/// Buckets repositories by UTC calendar year and derives summary statistics.
///
/// Timestamps that fail to parse are attributed to the current year; the
/// normalizer already guarantees parsable defaults, so this fallback only
/// protects against hand-constructed input. An empty input yields the zero
/// summary without panicking.
///
/// # Examples
///
/// ```
/// use grit::{Repository, summarize};
///
/// let repositories = vec![Repository {
///     id:          1,
///     name:        "hello-world".to_owned(),
///     description: None,
///     created_at:  "2022-03-14T09:26:53Z".to_owned(),
///     url:         "https://github.com/octocat/hello-world".to_owned(),
/// }];
/// let summary = summarize(&repositories,);
/// assert_eq!(summary.total_count, 1);
/// assert_eq!(summary.buckets[0].year, 2022);
/// ```
pub fn summarize(repositories: &[Repository],) -> YearSummary
{
    let mut grouped: BTreeMap<i32, Vec<Repository,>,> = BTreeMap::new();
    for repository in repositories {
        grouped.entry(creation_year(repository,),).or_default().push(repository.clone(),);
    }

    let total_count = repositories.len();
    let active_year_count = grouped.len();
    let max_count = grouped.values().map(Vec::len,).max().unwrap_or(0,);

    let buckets = grouped
        .into_iter()
        .rev()
        .map(|(year, members,)| YearBucket {
            year,
            count: members.len(),
            percent_of_total: percentage(members.len(), total_count,),
            bar_scale_percent: percentage(members.len(), max_count,),
            repositories: members,
        },)
        .collect();

    YearSummary {
        total_count,
        active_year_count,
        average_per_year: render_average(total_count, active_year_count,),
        buckets,
    }
}

/// Extracts the UTC calendar year of a repository's creation timestamp.
fn creation_year(repository: &Repository,) -> i32
{
    DateTime::parse_from_rfc3339(&repository.created_at,)
        .map_or_else(|_| Utc::now().year(), |timestamp| timestamp.with_timezone(&Utc,).year(),)
}

/// Expresses `count` as a percentage of `whole`, guarding division by zero.
fn percentage(count: usize, whole: usize,) -> f64
{
    if whole == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / whole as f64
}

/// Renders the average repositories per active year to one decimal place.
fn render_average(total_count: usize, active_year_count: usize,) -> String
{
    if active_year_count == 0 {
        return "0".to_owned();
    }
    format!("{:.1}", total_count as f64 / active_year_count as f64)
}
