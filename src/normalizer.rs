// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Transformation logic that converts raw GitHub repository records into
//! trusted internal representations.
//!
//! Normalization is total: malformed fields in individual records degrade to
//! documented defaults instead of aborting the batch. Only two conditions
//! remove a record entirely: the upstream fork flag and the absence of a
//! usable canonical link. Input order is preserved throughout.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Placeholder substituted for absent or empty repository names.
const UNTITLED_NAME: &str = "Untitled";

/// Trusted repository record produced by the normalizer.
///
/// Every instance satisfies the output invariants: `name` and `url` are
/// non-empty, `created_at` is a parsable ISO-8601 timestamp, and the source
/// never marked the record as a fork.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq,)]
pub struct Repository
{
    /// Upstream identifier, unique within one response set.
    pub id:          i64,
    /// Repository name, defaulting to a placeholder when absent upstream.
    pub name:        String,
    /// Optional description; an empty upstream string collapses to `None`.
    pub description: Option<String,>,
    /// ISO-8601 creation timestamp, defaulting to the current instant when
    /// the upstream value is absent or unparsable.
    pub created_at:  String,
    /// Canonical web link. Always non-empty.
    pub url:         String,
}

/// Normalizes a batch of raw repository records.
///
/// Entries that are not JSON objects or carry the fork flag are discarded,
/// survivors are mapped onto [`Repository`] with field defaults applied, and
/// records lacking a canonical link are dropped. The relative order of
/// surviving records matches the input.
///
/// # Examples
///
/// ```
/// use grit::normalize;
/// use serde_json::json;
///
/// let raw = vec![
///     json!({"id": 1, "name": "keep", "fork": false, "html_url": "https://example.com/keep"}),
///     json!({"id": 2, "name": "fork", "fork": true, "html_url": "https://example.com/fork"}),
/// ];
/// let repositories = normalize(&raw,);
/// assert_eq!(repositories.len(), 1);
/// assert_eq!(repositories[0].name, "keep");
/// ```
pub fn normalize(raw: &[Value],) -> Vec<Repository,>
{
    let repositories: Vec<Repository,> = raw.iter().filter_map(normalize_entry,).collect();
    debug!("normalized {} of {} raw repository records", repositories.len(), raw.len());
    repositories
}

/// Maps a single raw record onto [`Repository`], or discards it.
///
/// Returns `None` for non-objects, forks, and records without a canonical
/// link. All other field-level problems degrade to defaults.
fn normalize_entry(value: &Value,) -> Option<Repository,>
{
    let record = value.as_object()?;

    if record.get("fork",).and_then(Value::as_bool,).unwrap_or(false,) {
        return None;
    }

    let url = record.get("html_url",).and_then(Value::as_str,).unwrap_or("",);
    if url.is_empty() {
        return None;
    }

    let name = record
        .get("name",)
        .and_then(Value::as_str,)
        .filter(|candidate| !candidate.is_empty(),)
        .unwrap_or(UNTITLED_NAME,);

    let description = record
        .get("description",)
        .and_then(Value::as_str,)
        .filter(|candidate| !candidate.is_empty(),)
        .map(str::to_owned,);

    let created_at = record
        .get("created_at",)
        .and_then(Value::as_str,)
        .filter(|candidate| DateTime::parse_from_rfc3339(candidate,).is_ok(),)
        .map_or_else(current_timestamp, str::to_owned,);

    Some(Repository {
        id: record.get("id",).and_then(Value::as_i64,).unwrap_or(0,),
        name: name.to_owned(),
        description,
        created_at,
        url: url.to_owned(),
    },)
}

/// Returns the current instant as an ISO-8601 timestamp in UTC.
fn current_timestamp() -> String
{
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true,)
}

#[cfg(test)]
mod tests
{
    use serde_json::{Value, json};

    use super::{Repository, normalize};

    fn raw_repository(id: i64, name: &str,) -> Value
    {
        json!({
            "id": id,
            "name": name,
            "description": "a description",
            "fork": false,
            "created_at": "2022-03-14T09:26:53Z",
            "html_url": format!("https://github.com/octocat/{name}")
        })
    }

    #[test]
    fn maps_well_formed_records()
    {
        let raw = vec![raw_repository(1, "hello-world",)];

        let repositories = normalize(&raw,);
        assert_eq!(repositories.len(), 1);
        assert_eq!(
            repositories[0],
            Repository {
                id:          1,
                name:        "hello-world".to_owned(),
                description: Some("a description".to_owned(),),
                created_at:  "2022-03-14T09:26:53Z".to_owned(),
                url:         "https://github.com/octocat/hello-world".to_owned(),
            }
        );
    }

    #[test]
    fn drops_forks_and_keeps_non_forks()
    {
        let mut fork = raw_repository(1, "derived",);
        fork["fork"] = json!(true);
        let raw = vec![fork, raw_repository(2, "original",)];

        let repositories = normalize(&raw,);
        assert_eq!(repositories.len(), 1);
        assert_eq!(repositories[0].name, "original");
    }

    #[test]
    fn drops_records_without_canonical_link()
    {
        let mut missing = raw_repository(1, "missing-url",);
        missing.as_object_mut().expect("object",).remove("html_url",);
        let mut empty = raw_repository(2, "empty-url",);
        empty["html_url"] = json!("");
        let raw = vec![missing, empty, raw_repository(3, "kept",)];

        let repositories = normalize(&raw,);
        assert_eq!(repositories.len(), 1);
        assert_eq!(repositories[0].name, "kept");
    }

    #[test]
    fn drops_entries_that_are_not_objects()
    {
        let raw = vec![json!("plain string"), json!(42), json!(null), raw_repository(1, "kept",)];

        let repositories = normalize(&raw,);
        assert_eq!(repositories.len(), 1);
    }

    #[test]
    fn defaults_absent_or_empty_name()
    {
        let mut absent = raw_repository(1, "placeholder",);
        absent.as_object_mut().expect("object",).remove("name",);
        let mut empty = raw_repository(2, "placeholder",);
        empty["name"] = json!("");

        let repositories = normalize(&[absent, empty,],);
        assert_eq!(repositories[0].name, "Untitled");
        assert_eq!(repositories[1].name, "Untitled");
    }

    #[test]
    fn collapses_empty_description_to_absence()
    {
        let mut nulled = raw_repository(1, "nulled",);
        nulled["description"] = json!(null);
        let mut empty = raw_repository(2, "empty",);
        empty["description"] = json!("");

        let repositories = normalize(&[nulled, empty,],);
        assert_eq!(repositories[0].description, None);
        assert_eq!(repositories[1].description, None);
    }

    #[test]
    fn defaults_absent_or_unparsable_timestamp()
    {
        let mut absent = raw_repository(1, "absent-ts",);
        absent.as_object_mut().expect("object",).remove("created_at",);
        let mut garbled = raw_repository(2, "garbled-ts",);
        garbled["created_at"] = json!("not-a-timestamp");

        let repositories = normalize(&[absent, garbled,],);
        for repository in &repositories {
            assert!(
                chrono::DateTime::parse_from_rfc3339(&repository.created_at).is_ok(),
                "defaulted timestamp must be parsable: {}",
                repository.created_at
            );
        }
    }

    #[test]
    fn malformed_fields_do_not_drop_the_record()
    {
        let raw = vec![json!({
            "id": "not-a-number",
            "name": 17,
            "description": ["unexpected"],
            "fork": "nope",
            "created_at": false,
            "html_url": "https://github.com/octocat/survivor"
        })];

        let repositories = normalize(&raw,);
        assert_eq!(repositories.len(), 1);
        assert_eq!(repositories[0].id, 0);
        assert_eq!(repositories[0].name, "Untitled");
        assert_eq!(repositories[0].description, None);
    }

    #[test]
    fn preserves_input_order()
    {
        let raw = vec![
            raw_repository(3, "third",),
            raw_repository(1, "first",),
            raw_repository(2, "second",),
        ];

        let names: Vec<_,> =
            normalize(&raw,).into_iter().map(|repository| repository.name,).collect();
        assert_eq!(names, ["third", "first", "second"]);
    }

    #[test]
    fn normalization_is_idempotent_on_clean_output()
    {
        let raw = vec![raw_repository(1, "alpha",), raw_repository(2, "beta",)];
        let first_pass = normalize(&raw,);

        let reserialized: Vec<Value,> = first_pass
            .iter()
            .map(|repository| serde_json::to_value(repository,).expect("serializable",),)
            .collect();
        let second_pass = normalize(&reserialized,);

        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn empty_input_yields_empty_output()
    {
        assert!(normalize(&[]).is_empty());
    }
}
