//! Tag annotation for release entries
//!
//! Every entry is tagged with its own key. Concrete releases also carry the
//! key of their minor family, and a major family entry carries the minor
//! family of the release it points at:
//!
//! ```text
//! "1"     -> ["1", "1.1"]
//! "1.1"   -> ["1.1"]
//! "1.1.0" -> ["1.1", "1.1.0"]
//! ```

use tracing::debug;

use crate::release::error::ReleaseError;
use crate::release::semver::{KeyShape, VersionKey, max_version};
use crate::release::types::{LATEST_TAG, Record, Tags, VersionMapping};

/// Populate `tags` on every entry. Re-tagging an already tagged mapping is a no-op.
pub fn tag(versions: VersionMapping) -> Result<VersionMapping, ReleaseError> {
    versions
        .into_iter()
        .map(|(key, mut record)| -> Result<_, ReleaseError> {
            record.tags = tags_for(&key, &record)?;
            Ok((key, record))
        })
        .collect()
}

fn tags_for(key: &str, record: &Record) -> Result<Tags, ReleaseError> {
    let mut tags = record.tags.clone();
    tags.insert(key);

    match KeyShape::of(key) {
        KeyShape::Major => {
            let family = VersionKey::parse(&record.version)?
                .with_prefix(key.starts_with('v'))
                .minor_key();
            tags.insert(family);
        }
        KeyShape::Minor => {}
        KeyShape::Concrete | KeyShape::Other => {
            tags.insert(VersionKey::parse(key)?.minor_key());
        }
    }

    Ok(tags)
}

/// Tag the highest `major.minor.patch` entry as `latest`.
///
/// Pre-release and family keys are never candidates.
pub fn annotate_latest(mut versions: VersionMapping) -> Result<VersionMapping, ReleaseError> {
    let latest = max_version(
        versions
            .keys()
            .map(String::as_str)
            .filter(|key| KeyShape::of(key) == KeyShape::Concrete),
    )?
    .map(str::to_string)
    .ok_or_else(|| ReleaseError::NotFound("no major.minor.patch release".to_string()))?;

    debug!("Latest release is {}", latest);

    if let Some(record) = versions.get_mut(&latest) {
        record.tags.insert(LATEST_TAG);
    }
    Ok(versions)
}
