//! Insertion-ordered map of preset name to parameters.
//!
//! Replacing an existing entry keeps its position; new names are appended.
//! The order survives (de)serialization so the unranked tail of the preset
//! list stays put across sessions.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::schema::PresetParameters;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetCollection {
    entries: Vec<(String, PresetParameters)>,
}

impl PresetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&PresetParameters> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PresetParameters> {
        self.position(name).map(move |i| &mut self.entries[i].1)
    }

    /// Insert or replace, returning the previous parameters
    pub fn insert(&mut self, name: String, params: PresetParameters) -> Option<PresetParameters> {
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, params)),
            None => {
                self.entries.push((name, params));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PresetParameters> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PresetParameters)> + '_ {
        self.entries.iter().map(|(name, params)| (name.as_str(), params))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl FromIterator<(String, PresetParameters)> for PresetCollection {
    fn from_iter<I: IntoIterator<Item = (String, PresetParameters)>>(iter: I) -> Self {
        let mut presets = PresetCollection::new();
        for (name, params) in iter {
            presets.insert(name, params);
        }
        presets
    }
}

impl Serialize for PresetCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, params)| (name, params)))
    }
}

impl<'de> Deserialize<'de> for PresetCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = PresetCollection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of preset names to parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut presets = PresetCollection::new();
                while let Some((name, params)) = access.next_entry::<String, PresetParameters>()? {
                    presets.insert(name, params);
                }
                Ok(presets)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}
