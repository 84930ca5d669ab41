//! Insertion-ordered persistent map.
//!
//! Lookups go through an `im::HashMap`; an `im::Vector` remembers the order
//! keys were first inserted in, which is the order reports print them in.
//! Both are persistent structures, so cloning a whole collection for a
//! snapshot is O(1).

use std::fmt;
use std::marker::PhantomData;

use im::{HashMap, Vector};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Map from names to values that iterates in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally<V: Clone> {
    order: Vector<String>,
    entries: HashMap<String, V>,
}

impl<V: Clone> Default for Tally<V> {
    fn default() -> Self {
        Self {
            order: Vector::new(),
            entries: HashMap::new(),
        }
    }
}

impl<V: Clone> Tally<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Value at `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: &str, default: F) -> &mut V {
        if !self.entries.contains_key(key) {
            self.order.push_back(key.to_string());
        }
        self.entries.entry(key.to_string()).or_insert_with(default)
    }

    /// Set `key` to `value`, keeping its original position if present.
    pub fn insert(&mut self, key: &str, value: V) {
        match self.entries.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.order.push_back(key.to_string());
                self.entries.insert(key.to_string(), value);
            }
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|value| (key.as_str(), value)))
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<V: Clone + Serialize> Serialize for Tally<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Clone + Deserialize<'de>> Deserialize<'de> for Tally<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TallyVisitor(PhantomData))
    }
}

struct TallyVisitor<V>(PhantomData<V>);

impl<'de, V: Clone + Deserialize<'de>> Visitor<'de> for TallyVisitor<V> {
    type Value = Tally<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut tally = Tally::new();
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            tally.insert(&key, value);
        }
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_in_insertion_order() {
        let mut tally = Tally::new();
        *tally.get_or_insert_with("zeta", || 0u64) += 1;
        tally.get_or_insert_with("alpha", || 5);
        tally.get_or_insert_with("mid", || 2);

        let keys: Vec<_> = tally.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let values: Vec<_> = tally.values().copied().collect();
        assert_eq!(values, vec![1, 5, 2]);
    }

    #[test]
    fn test_get_or_insert_keeps_existing() {
        let mut tally = Tally::new();
        *tally.get_or_insert_with("a", || 0u64) = 7;
        let value = *tally.get_or_insert_with("a", || 0);

        assert_eq!(value, 7);
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Tally::new();
        original.get_or_insert_with("a", || 1u64);

        let snapshot = original.clone();
        *original.get_mut("a").unwrap() = 9;

        assert_eq!(snapshot.get("a"), Some(&1));
        assert_eq!(original.get("a"), Some(&9));
    }

    #[test]
    fn test_json_keeps_order() {
        let mut tally = Tally::new();
        tally.get_or_insert_with("b", || 2u64);
        tally.get_or_insert_with("a", || 1);

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);

        let back: Tally<u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
