//! Release records as they appear in the upstream index

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag attached to the highest concrete release
pub const LATEST_TAG: &str = "latest";

/// Mapping from version key to release record, kept in version order
pub type VersionMapping = IndexMap<String, Record>;

/// Sorted, de-duplicated set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the tag was already present
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Metadata of one release
///
/// Fields other than `version` and `tags` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub version: String,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
    #[serde(flatten)]
    pub metadata: IndexMap<String, Value>,
}

impl Record {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            tags: Tags::new(),
            metadata: IndexMap::new(),
        }
    }
}

/// Release index document, e.g. `{"name": "terraform", "versions": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseIndex {
    #[serde(flatten)]
    pub metadata: IndexMap<String, Value>,
    pub versions: VersionMapping,
}

impl ReleaseIndex {
    pub fn new(versions: VersionMapping) -> Self {
        Self {
            metadata: IndexMap::new(),
            versions,
        }
    }
}
