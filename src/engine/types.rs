// src/engine/types.rs
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::sanitize::canonical_key;

/// One titled section of a page and the labels read from it, in output order.
#[derive(Clone, Copy, Debug)]
pub struct SectionSpec {
    pub header: &'static str,
    pub labels: &'static [&'static str],
}

/// Ordered canonical-key → value map. Every requested key is present;
/// absent values are empty strings. Serializes as a JSON object in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// All keys for `labels`, all values empty.
    pub fn empty(labels: &[&str]) -> Self {
        labels.iter().map(|l| (canonical_key(l), s!())).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, empty when absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every value is empty (the section was absent or blank).
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_empty())
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
