//! Builds major and minor family entries on top of concrete releases

use std::collections::HashMap;

use tracing::debug;

use crate::release::error::ReleaseError;
use crate::release::semver::{KeyShape, VersionKey, sort_mapping};
use crate::release::types::VersionMapping;

/// Drop keys that are not purely numeric, e.g. `1.2.0-beta1` or `1.2.0+ent`
pub fn filter_prerelease(versions: VersionMapping) -> VersionMapping {
    let total = versions.len();
    let filtered: VersionMapping = versions
        .into_iter()
        .filter(|(key, _)| KeyShape::of(key).is_release())
        .collect();

    debug!(
        "Dropped {} pre-release versions, {} remain",
        total - filtered.len(),
        filtered.len()
    );
    filtered
}

/// Extend concrete releases with `major` and `major.minor` entries.
///
/// Each family entry holds a copy of the record of its highest member by
/// semantic version. The result is sorted by the version order of its keys.
pub fn aggregate(versions: &VersionMapping) -> Result<VersionMapping, ReleaseError> {
    let mut representatives: HashMap<String, (VersionKey, &str)> = HashMap::new();

    for key in versions.keys().map(String::as_str) {
        let parsed = VersionKey::parse(key)?;
        for family in [parsed.major_key(), parsed.minor_key()] {
            representatives
                .entry(family)
                .and_modify(|(current, current_key)| {
                    if parsed.outranks(current) {
                        *current = parsed.clone();
                        *current_key = key;
                    }
                })
                .or_insert_with(|| (parsed.clone(), key));
        }
    }

    let mut extended = versions.clone();
    for (family, (_, key)) in representatives {
        extended.insert(family, versions[key].clone());
    }

    debug!(
        "Aggregated {} releases into {} entries",
        versions.len(),
        extended.len()
    );

    sort_mapping(extended)
}
