//! Ordered (name, chance) tables.
//!
//! Border tables resolve "first success wins", so their order is part of
//! their meaning. JSON objects are deserialized entry by entry into a
//! sequence instead of going through a hash map, which would lose it.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::core::Chance;

/// Sequence of (name, chance) pairs in definition order.
pub type ChanceTable = SmallVec<[(String, Chance); 6]>;

/// Serde wrapper reading a JSON object as a [`ChanceTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedChances(pub ChanceTable);

impl OrderedChances {
    #[must_use]
    pub fn into_table(self) -> ChanceTable {
        self.0
    }
}

impl<'de> Deserialize<'de> for OrderedChances {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedChancesVisitor)
    }
}

struct OrderedChancesVisitor;

impl<'de> Visitor<'de> for OrderedChancesVisitor {
    type Value = OrderedChances;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of names to percentages")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut table = ChanceTable::new();
        while let Some((name, chance)) = map.next_entry::<String, Chance>()? {
            table.push((name, chance));
        }
        Ok(OrderedChances(table))
    }
}

impl Serialize for OrderedChances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, chance) in &self.0 {
            map.serialize_entry(name, chance)?;
        }
        map.end()
    }
}
