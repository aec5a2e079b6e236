//! Replaces family placeholders with the releases they stand for

use tracing::debug;

use crate::release::error::ReleaseError;
use crate::release::semver::{KeyShape, sort_mapping};
use crate::release::types::VersionMapping;

/// Rename every family key to the version of the release it points at.
///
/// The renamed entry takes its record from `lookup` (the full tagged
/// mapping), so it carries the tags of the concrete release. When a
/// concrete key is already selected it is kept as is.
pub fn resolve(
    selected: VersionMapping,
    lookup: &VersionMapping,
) -> Result<VersionMapping, ReleaseError> {
    let mut resolved = VersionMapping::with_capacity(selected.len());
    let mut placeholders = Vec::new();

    for (key, record) in selected {
        if KeyShape::of(&key).is_aggregate() {
            placeholders.push(record);
        } else {
            resolved.insert(key, record);
        }
    }

    debug!("Resolving {} family entries", placeholders.len());

    for placeholder in placeholders {
        let record = lookup
            .get(&placeholder.version)
            .cloned()
            .unwrap_or(placeholder);
        resolved.entry(record.version.clone()).or_insert(record);
    }

    sort_mapping(resolved)
}
