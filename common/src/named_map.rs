use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// A map from names to values that remembers insertion order.
///
/// Lookups go through a name index, iteration follows the order in which
/// names were last written. Inserting under a name that already exists
/// replaces the old value and moves the name to the end.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMap<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> NamedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `name` and returns a mutable reference to it.
    pub fn insert<N>(&mut self, name: N, value: T) -> &mut T
    where
        N: Into<String>,
    {
        let name = name.into();

        if let Some(position) = self.index.remove(&name) {
            self.entries.remove(position);
            for (_, slot) in self.index.iter_mut() {
                if *slot > position {
                    *slot -= 1;
                }
            }
        }

        let position = self.entries.len();
        self.index.insert(name.clone(), position);
        self.entries.push((name, value));
        &mut self.entries[position].1
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.index.get(name) {
            Some(&position) => Some(&mut self.entries[position].1),
            None => None,
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first name in insertion order.
    pub fn first_key(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<T: Serialize> Serialize for NamedMap<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
