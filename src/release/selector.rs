//! Selection of the entries to report

use regex::Regex;
use tracing::debug;

use crate::release::error::ReleaseError;
use crate::release::semver::KeyShape;
use crate::release::types::VersionMapping;

/// Number of minor families reported when nothing else is asked for
pub const DEFAULT_COUNT: i64 = 1;

#[derive(Debug, Clone)]
pub enum Selection {
    /// The last N minor families, in version order
    Window(usize),
    /// Entries whose key matches the pattern at its start
    Pattern(Regex),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::window(DEFAULT_COUNT)
    }
}

impl Selection {
    /// Window over the last `count` minor families. A count of zero or
    /// less selects nothing.
    pub fn window(count: i64) -> Self {
        Selection::Window(usize::try_from(count).unwrap_or(0))
    }

    /// Compile a key pattern. Only matches starting at the first character
    /// of a key select it.
    pub fn pattern(pattern: &str) -> Result<Self, ReleaseError> {
        Ok(Selection::Pattern(Regex::new(pattern)?))
    }

    /// Pick entries from a version-ordered mapping.
    ///
    /// A window larger than the number of minor families returns all of them;
    /// a window of zero returns nothing.
    pub fn select(&self, versions: &VersionMapping) -> VersionMapping {
        let selected: VersionMapping = match self {
            Selection::Pattern(regex) => versions
                .iter()
                .filter(|(key, _)| regex.find(key).is_some_and(|m| m.start() == 0))
                .map(|(key, record)| (key.clone(), record.clone()))
                .collect(),
            Selection::Window(count) => {
                let families: Vec<_> = versions
                    .iter()
                    .filter(|(key, _)| KeyShape::of(key) == KeyShape::Minor)
                    .collect();
                let skip = families.len().saturating_sub(*count);
                families
                    .into_iter()
                    .skip(skip)
                    .map(|(key, record)| (key.clone(), record.clone()))
                    .collect()
            }
        };

        debug!("Selected {} of {} entries", selected.len(), versions.len());
        selected
    }
}
