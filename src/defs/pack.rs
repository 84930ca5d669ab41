//! Pack definitions.
//!
//! A pack is an ordered list of slots. Fixed slots draw a card type a set
//! number of times; chance slots roll each of their entries independently,
//! so several entries of one chance slot may hit in the same pack.
//!
//! On disk a pack is a JSON object. Keys name card types mapped to counts;
//! keys starting with `*` hold chance tables:
//!
//! ```json
//! { "base_common": 7, "*last": { "ghost": 0.1, "base_rare": 5 } }
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::ordered::{ChanceTable, OrderedChances};
use crate::core::Chance;

/// Key prefix marking a chance slot.
pub const CHANCE_SLOT_PREFIX: char = '*';

/// One slot of a pack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Draw `card_type` exactly `count` times.
    Fixed { card_type: String, count: u32 },
    /// Roll each entry independently; each success draws its card type once.
    Chance { label: String, entries: ChanceTable },
}

impl Slot {
    /// Card types this slot can draw.
    pub fn card_types(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Slot::Fixed { card_type, .. } => Box::new(std::iter::once(card_type.as_str())),
            Slot::Chance { entries, .. } => Box::new(entries.iter().map(|(c, _)| c.as_str())),
        }
    }
}

/// Immutable pack definition.
///
/// ```
/// use tcg_sim::defs::PackDefinition;
///
/// let pack = PackDefinition::new("base_common")
///     .with_fixed("base_common", 7)
///     .with_chances("bonus", [("ghost", 0.1), ("base_rare", 5.0)]);
///
/// assert_eq!(pack.slots.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackDefinition {
    /// Pack identifier.
    pub name: String,

    /// Slots in opening order.
    pub slots: Vec<Slot>,
}

impl PackDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_record(name: impl Into<String>, record: PackRecord) -> Self {
        Self {
            name: name.into(),
            slots: record.slots,
        }
    }

    /// Append a fixed slot.
    #[must_use]
    pub fn with_fixed(mut self, card_type: impl Into<String>, count: u32) -> Self {
        self.slots.push(Slot::Fixed {
            card_type: card_type.into(),
            count,
        });
        self
    }

    /// Append a chance slot from (card type, percentage) pairs.
    #[must_use]
    pub fn with_chances<I, S>(mut self, label: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(card_type, percent)| (card_type.into(), Chance::from_percent(percent)))
            .collect();
        self.slots.push(Slot::Chance {
            label: label.into(),
            entries,
        });
        self
    }

    /// Number of draws the fixed slots always produce.
    #[must_use]
    pub fn guaranteed_draws(&self) -> u64 {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Fixed { count, .. } => u64::from(*count),
                Slot::Chance { .. } => 0,
            })
            .sum()
    }
}

/// On-disk shape of a pack: its slots in key order.
#[derive(Clone, Debug, Default)]
pub struct PackRecord {
    pub slots: Vec<Slot>,
}

impl<'de> Deserialize<'de> for PackRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PackRecordVisitor)
    }
}

struct PackRecordVisitor;

impl<'de> Visitor<'de> for PackRecordVisitor {
    type Value = PackRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of card types to counts or '*'-prefixed chance tables")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut slots = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.strip_prefix(CHANCE_SLOT_PREFIX) {
                Some(label) => Slot::Chance {
                    label: label.to_string(),
                    entries: map.next_value::<OrderedChances>()?.into_table(),
                },
                None => Slot::Fixed {
                    count: map.next_value()?,
                    card_type: key,
                },
            };
            slots.push(slot);
        }
        Ok(PackRecord { slots })
    }
}
