//! Semantic version ordering for release keys
//!
//! Release keys come in three shapes:
//! - `1` - major family
//! - `1.2` - minor family
//! - `1.2.3` - concrete release (may carry a pre-release or build suffix)
//!
//! All of them may be `v`-prefixed.

use std::cmp::{Ordering, Reverse};

use semver::{BuildMetadata, Prerelease, Version};

use crate::release::error::ReleaseError;
use crate::release::types::VersionMapping;

/// Shape of a key in a [`VersionMapping`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    /// `major`
    Major,
    /// `major.minor`
    Minor,
    /// `major.minor.patch` with numeric components only
    Concrete,
    /// Anything else, e.g. `1.2.0-beta1`
    Other,
}

impl KeyShape {
    pub fn of(key: &str) -> Self {
        let core = key.strip_prefix('v').unwrap_or(key);
        let parts: Vec<&str> = core.split('.').collect();
        let numeric = parts
            .iter()
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));

        match (numeric, parts.len()) {
            (true, 1) => KeyShape::Major,
            (true, 2) => KeyShape::Minor,
            (true, 3) => KeyShape::Concrete,
            _ => KeyShape::Other,
        }
    }

    /// Major and minor family keys
    pub fn is_aggregate(self) -> bool {
        matches!(self, KeyShape::Major | KeyShape::Minor)
    }

    /// Keys made of numeric components only
    pub fn is_release(self) -> bool {
        self != KeyShape::Other
    }
}

/// Comparable form of a version key.
///
/// Partial keys are padded with zeros, so `1` and `1.0` compare equal to
/// `1.0.0` on version; the number of components given breaks the tie so
/// that a family key sorts right before its first member. Build metadata
/// only orders keys that are otherwise equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    version: Version,
    precision: usize,
    prefixed: bool,
}

impl VersionKey {
    /// Parse a version key, padding partial versions.
    ///
    /// Examples:
    /// - "1" -> 1.0.0
    /// - "v1.2" -> 1.2.0
    /// - "1.2.3-rc1" -> 1.2.3-rc1
    pub fn parse(key: &str) -> Result<Self, ReleaseError> {
        let trimmed = key.strip_prefix('v').unwrap_or(key);
        let core_end = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
        let (core, suffix) = trimmed.split_at(core_end);
        let precision = core.split('.').count();

        let normalized = match precision {
            1 => format!("{core}.0.0{suffix}"),
            2 => format!("{core}.0{suffix}"),
            _ => trimmed.to_string(),
        };

        let version = Version::parse(&normalized).map_err(|source| ReleaseError::Parse {
            version: key.to_string(),
            source,
        })?;

        Ok(Self {
            version,
            precision,
            prefixed: key.starts_with('v'),
        })
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Semantic version precedence, which ignores build metadata
    pub fn precedence(&self) -> (u64, u64, u64, &Prerelease) {
        (
            self.version.major,
            self.version.minor,
            self.version.patch,
            &self.version.pre,
        )
    }

    /// Whether this version should represent a family over `other`.
    ///
    /// Higher precedence wins; on equal precedence a version without build
    /// metadata wins over one with it.
    pub fn outranks(&self, other: &VersionKey) -> bool {
        self.rank() > other.rank()
    }

    fn rank(&self) -> ((u64, u64, u64, &Prerelease), Reverse<&BuildMetadata>) {
        (self.precedence(), Reverse(&self.version.build))
    }

    /// Render family keys with or without the `v` prefix
    pub fn with_prefix(mut self, prefixed: bool) -> Self {
        self.prefixed = prefixed;
        self
    }

    /// Key of the major family this version belongs to, e.g. `1`
    pub fn major_key(&self) -> String {
        format!("{}{}", self.prefix(), self.version.major)
    }

    /// Key of the minor family this version belongs to, e.g. `1.2`
    pub fn minor_key(&self) -> String {
        format!(
            "{}{}.{}",
            self.prefix(),
            self.version.major,
            self.version.minor
        )
    }

    fn prefix(&self) -> &'static str {
        if self.prefixed { "v" } else { "" }
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence()
            .cmp(&other.precedence())
            .then(self.precision.cmp(&other.precision))
            .then(self.prefixed.cmp(&other.prefixed))
            .then_with(|| self.version.build.cmp(&other.version.build))
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Return the input string holding the highest version.
///
/// Every input must parse; a single malformed version fails the whole call.
/// Returns `None` for an empty input.
pub fn max_version<'a, I>(versions: I) -> Result<Option<&'a str>, ReleaseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut latest: Option<(VersionKey, &'a str)> = None;
    for candidate in versions {
        let parsed = VersionKey::parse(candidate)?;
        match &latest {
            Some((current, _)) if !parsed.outranks(current) => {}
            _ => latest = Some((parsed, candidate)),
        }
    }
    Ok(latest.map(|(_, version)| version))
}

/// Reorder a mapping by the semantic-version order of its keys
pub fn sort_mapping(versions: VersionMapping) -> Result<VersionMapping, ReleaseError> {
    let mut entries = versions
        .into_iter()
        .map(|(key, record)| -> Result<_, ReleaseError> {
            Ok((VersionKey::parse(&key)?, key, record))
        })
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries
        .into_iter()
        .map(|(_, key, record)| (key, record))
        .collect())
}
