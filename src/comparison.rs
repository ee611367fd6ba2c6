//! Side-by-side personality responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One personality's answer to the probe message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub name: String,
    pub response: String,
}

/// Responses keyed by personality key, produced by a single comparison call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonSet {
    entries: BTreeMap<String, ComparisonEntry>,
}

impl ComparisonSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ComparisonEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComparisonEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ComparisonEntry)> for ComparisonSet {
    fn from_iter<I: IntoIterator<Item = (String, ComparisonEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
