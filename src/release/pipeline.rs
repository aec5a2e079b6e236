//! Runs the release pipeline over one index snapshot

use serde::Serialize;
use tracing::info;

use crate::release::aggregator::{aggregate, filter_prerelease};
use crate::release::error::ReleaseError;
use crate::release::resolver::resolve;
use crate::release::selector::Selection;
use crate::release::tagger::{annotate_latest, tag};
use crate::release::types::ReleaseIndex;

/// How a snapshot is turned into a response
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub selection: Selection,
    /// Keep versions with a pre-release or build suffix
    pub include_prerelease: bool,
    /// Return full records instead of bare version strings
    pub include_metadata: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Concrete versions in version order
    Versions(Vec<String>),
    /// The index document with `versions` narrowed to the selection
    Index(ReleaseIndex),
}

/// Aggregate, tag, select and resolve the releases of `index`.
pub fn run(index: ReleaseIndex, options: &Options) -> Result<Response, ReleaseError> {
    let ReleaseIndex { metadata, versions } = index;
    info!("Processing {} releases", versions.len());

    let versions = if options.include_prerelease {
        versions
    } else {
        filter_prerelease(versions)
    };

    let tagged = annotate_latest(tag(aggregate(&versions)?)?)?;
    let selected = options.selection.select(&tagged);
    let resolved = resolve(selected, &tagged)?;

    info!("Resolved {} releases", resolved.len());

    if options.include_metadata {
        Ok(Response::Index(ReleaseIndex {
            metadata,
            versions: resolved,
        }))
    } else {
        Ok(Response::Versions(resolved.into_keys().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::types::{Record, VersionMapping};
    use rstest::rstest;
    use serde_json::json;

    fn index(keys: &[&str]) -> ReleaseIndex {
        let versions: VersionMapping = keys
            .iter()
            .map(|k| (k.to_string(), Record::new(*k)))
            .collect();
        ReleaseIndex::new(versions)
    }

    fn versions(response: Response) -> Vec<String> {
        match response {
            Response::Versions(versions) => versions,
            Response::Index(index) => panic!("unexpected index response: {index:?}"),
        }
    }

    const FEED: &[&str] = &[
        "0.14.0", "0.14.11", "0.15.0", "0.15.5", "1.0.0", "1.0.11", "1.1.0-alpha1", "1.1.0-beta2",
    ];

    #[rstest]
    #[case(1, &["1.0.11"])]
    #[case(2, &["0.15.5", "1.0.11"])]
    #[case(5, &["0.14.11", "0.15.5", "1.0.11"])]
    #[case(0, &[])]
    #[case(-3, &[])]
    fn run_returns_latest_release_of_each_family(#[case] count: i64, #[case] expected: &[&str]) {
        let options = Options {
            selection: Selection::window(count),
            ..Default::default()
        };

        let result = versions(run(index(FEED), &options).unwrap());

        assert_eq!(result, expected);
    }

    #[test]
    fn run_includes_prereleases_when_asked() {
        let options = Options {
            include_prerelease: true,
            ..Default::default()
        };

        let result = versions(run(index(FEED), &options).unwrap());

        assert_eq!(result, vec!["1.1.0-beta2"]);
    }

    #[test]
    fn run_with_pattern_ignores_count() {
        let options = Options {
            selection: Selection::pattern(r"^1\.").unwrap(),
            ..Default::default()
        };

        let result = versions(run(index(&["0.15.0", "1.0.0", "1.1.0"]), &options).unwrap());

        assert_eq!(result, vec!["1.0.0", "1.1.0"]);
    }

    #[test]
    fn run_with_metadata_keeps_index_fields() {
        let mut input = index(&["1.0.0", "1.1.0", "2.0.0"]);
        input
            .metadata
            .insert("name".to_string(), json!("terraform"));
        let options = Options {
            include_metadata: true,
            ..Default::default()
        };

        let result = run(input, &options).unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "name": "terraform",
                "versions": {
                    "2.0.0": {"version": "2.0.0", "tags": ["2.0", "2.0.0", "latest"]}
                }
            })
        );
    }

    #[test]
    fn run_fails_on_malformed_version() {
        let options = Options {
            include_prerelease: true,
            ..Default::default()
        };

        let result = run(index(&["1.0.0", "1.0.x"]), &options);

        assert!(matches!(result, Err(ReleaseError::Parse { .. })));
    }

    #[test]
    fn run_fails_without_any_release() {
        let options = Options {
            include_prerelease: true,
            ..Default::default()
        };

        let result = run(index(&["1.0.0-rc1"]), &options);

        assert!(matches!(result, Err(ReleaseError::NotFound(_))));
    }
}
