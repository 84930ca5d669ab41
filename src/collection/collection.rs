//! The three-level counted collection.
//!
//! `expansion → border → card → count`. A `_foil` border is a separate key
//! from its plain border, not a flag on it.
//!
//! An expansion must be registered before anything touches its subtree.
//! Registration creates every (border, card) entry with count 0, which is
//! what lets completion checks treat "0" as "never drawn".

use serde::{Deserialize, Serialize};

use super::tally::Tally;
use crate::core::{Result, SimError};
use crate::defs::ExpansionDefinition;

/// Counts per card name.
pub type CardCounts = Tally<u64>;

/// Card counts per border name (plain and foil).
pub type BorderCounts = Tally<CardCounts>;

/// A player's card collection.
///
/// ## Example
///
/// ```
/// use tcg_sim::collection::Collection;
/// use tcg_sim::defs::ExpansionDefinition;
///
/// let exp = ExpansionDefinition::new("ghost", ["Boo"], ["base"]);
/// let mut collection = Collection::new();
/// collection.register(&exp);
///
/// collection.increment("ghost", "base_foil", "Boo").unwrap();
/// assert_eq!(collection.count_at("ghost", "base_foil", "Boo").unwrap(), 1);
/// assert_eq!(collection.count_at("ghost", "base", "Boo").unwrap(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    expansions: Tally<BorderCounts>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure every (border, foil border) × card entry of `expansion`
    /// exists.
    ///
    /// Idempotent: only fills gaps and never resets a count, so it also
    /// upgrades a collection saved against an older definition.
    pub fn register(&mut self, expansion: &ExpansionDefinition) {
        let borders = self
            .expansions
            .get_or_insert_with(expansion.name(), Tally::new);

        for border in expansion.variant_borders() {
            let cards = borders.get_or_insert_with(border, Tally::new);
            for card in expansion.cards() {
                cards.get_or_insert_with(card, || 0);
            }
        }
    }

    /// True once `expansion` has been registered.
    #[must_use]
    pub fn is_registered(&self, expansion: &str) -> bool {
        self.expansions.contains_key(expansion)
    }

    /// True if the full path exists.
    #[must_use]
    pub fn contains(&self, expansion: &str, border: &str, card: &str) -> bool {
        self.expansions
            .get(expansion)
            .and_then(|borders| borders.get(border))
            .is_some_and(|cards| cards.contains_key(card))
    }

    /// Add one card at the path and return the new count.
    pub fn increment(&mut self, expansion: &str, border: &str, card: &str) -> Result<u64> {
        let borders = self
            .expansions
            .get_mut(expansion)
            .ok_or_else(|| SimError::not_registered(expansion, None, None))?;
        let cards = borders
            .get_mut(border)
            .ok_or_else(|| SimError::not_registered(expansion, Some(border), None))?;
        let count = cards
            .get_mut(card)
            .ok_or_else(|| SimError::not_registered(expansion, Some(border), Some(card)))?;

        *count += 1;
        Ok(*count)
    }

    /// Current count at the path. 0 means registered but never drawn.
    pub fn count_at(&self, expansion: &str, border: &str, card: &str) -> Result<u64> {
        let borders = self.borders(expansion)?;
        let cards = borders
            .get(border)
            .ok_or_else(|| SimError::not_registered(expansion, Some(border), None))?;
        cards
            .get(card)
            .copied()
            .ok_or_else(|| SimError::not_registered(expansion, Some(border), Some(card)))
    }

    /// Border subtree of a registered expansion.
    pub fn borders(&self, expansion: &str) -> Result<&BorderCounts> {
        self.expansions
            .get(expansion)
            .ok_or_else(|| SimError::not_registered(expansion, None, None))
    }

    /// Registered expansion names in registration order.
    pub fn expansion_names(&self) -> impl Iterator<Item = &str> {
        self.expansions.keys()
    }

    /// Expansions and their border subtrees in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BorderCounts)> {
        self.expansions.iter()
    }

    /// Number of registered expansions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }

    /// Total cards drawn across every registered path, duplicates included.
    #[must_use]
    pub fn total_cards(&self) -> u64 {
        self.expansions
            .values()
            .flat_map(Tally::values)
            .flat_map(Tally::values)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> ExpansionDefinition {
        ExpansionDefinition::new("base_common", ["Piggy", "Burpig"], ["base", "gold"])
    }

    #[test]
    fn test_register_creates_every_variant() {
        let exp = two_by_two();
        let mut collection = Collection::new();
        collection.register(&exp);

        for border in ["base", "base_foil", "gold", "gold_foil"] {
            for card in ["Piggy", "Burpig"] {
                assert_eq!(collection.count_at("base_common", border, card).unwrap(), 0);
            }
        }
        let borders: Vec<_> = collection.borders("base_common").unwrap().keys().collect();
        assert_eq!(borders, vec!["base", "base_foil", "gold", "gold_foil"]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let exp = two_by_two();
        let mut once = Collection::new();
        once.register(&exp);
        once.increment("base_common", "gold", "Piggy").unwrap();

        let mut twice = once.clone();
        twice.register(&exp);

        assert_eq!(once, twice);
        assert_eq!(twice.count_at("base_common", "gold", "Piggy").unwrap(), 1);
    }

    #[test]
    fn test_register_fills_gaps_of_older_definition() {
        let old = ExpansionDefinition::new("base_common", ["Piggy"], ["base"]);
        let mut collection = Collection::new();
        collection.register(&old);
        collection.increment("base_common", "base", "Piggy").unwrap();

        collection.register(&two_by_two());

        assert_eq!(collection.count_at("base_common", "base", "Piggy").unwrap(), 1);
        assert_eq!(collection.count_at("base_common", "gold_foil", "Burpig").unwrap(), 0);
    }

    #[test]
    fn test_increment_is_monotonic() {
        let mut collection = Collection::new();
        collection.register(&two_by_two());

        for expected in 1..=5 {
            let count = collection.increment("base_common", "base", "Burpig").unwrap();
            assert_eq!(count, expected);
        }
        assert_eq!(collection.total_cards(), 5);
    }

    #[test]
    fn test_unregistered_paths_fail() {
        let mut collection = Collection::new();
        collection.register(&two_by_two());

        let err = collection.increment("destiny_common", "base", "Piggy").unwrap_err();
        assert!(matches!(err, SimError::NotRegistered { border: None, .. }));

        let err = collection.increment("base_common", "silver", "Piggy").unwrap_err();
        assert!(matches!(err, SimError::NotRegistered { border: Some(_), card: None, .. }));

        let err = collection.count_at("base_common", "base", "Nobody").unwrap_err();
        assert!(matches!(err, SimError::NotRegistered { card: Some(_), .. }));

        assert!(!collection.contains("base_common", "base", "Nobody"));
        assert!(collection.contains("base_common", "gold_foil", "Piggy"));
    }

    #[test]
    fn test_expansions_keep_registration_order() {
        let mut collection = Collection::new();
        collection.register(&ExpansionDefinition::new("destiny_common", ["A"], ["base"]));
        collection.register(&two_by_two());

        let names: Vec<_> = collection.expansion_names().collect();
        assert_eq!(names, vec!["destiny_common", "base_common"]);
    }

    #[test]
    fn test_json_shape() {
        let mut collection = Collection::new();
        collection.register(&ExpansionDefinition::new("ghost", ["Boo"], ["base"]));
        collection.increment("ghost", "base", "Boo").unwrap();

        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, r#"{"ghost":{"base":{"Boo":1},"base_foil":{"Boo":0}}}"#);
    }
}
