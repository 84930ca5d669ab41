//! Pack opening.
//!
//! Slots are evaluated in definition order. A fixed slot resolves its card
//! type `count` times; a chance slot rolls each entry on its own and
//! resolves the entry's card type once per success.
//!
//! Opening is all-or-nothing: every draw is resolved and checked against
//! the collection before any count changes, so a pack that would hit an
//! unregistered path leaves the collection as it was.

use std::sync::Arc;

use super::audit::Reachability;
use super::expansion::Expansion;
use super::resolver::{Draw, DrawResolver};
use crate::collection::Collection;
use crate::core::{RandomSource, Result};
use crate::defs::{Definitions, PackDefinition, Slot};

/// A pack bound to the definition cache it resolves cards through.
#[derive(Clone, Debug)]
pub struct Pack<'d> {
    def: Arc<PackDefinition>,
    resolver: DrawResolver<'d>,
}

impl<'d> Pack<'d> {
    /// Load a pack through the definition cache.
    pub fn load(defs: &'d Definitions, id: &str) -> Result<Self> {
        Ok(Self::new(defs, defs.pack(id)?))
    }

    #[must_use]
    pub fn new(defs: &'d Definitions, def: Arc<PackDefinition>) -> Self {
        Self {
            def,
            resolver: DrawResolver::new(defs),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn definition(&self) -> &PackDefinition {
        &self.def
    }

    /// Resolve every draw of one pack without touching a collection.
    pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Vec<Draw>> {
        let mut draws = Vec::new();
        for slot in &self.def.slots {
            match slot {
                Slot::Fixed { card_type, count } => {
                    for _ in 0..*count {
                        draws.push(self.resolver.resolve(card_type, rng)?);
                    }
                }
                Slot::Chance { entries, .. } => {
                    for (card_type, chance) in entries {
                        if chance.roll(rng) {
                            draws.push(self.resolver.resolve(card_type, rng)?);
                        }
                    }
                }
            }
        }
        Ok(draws)
    }

    /// Open one pack into `collection` and return the draws it added.
    pub fn open<R: RandomSource + ?Sized>(
        &self,
        collection: &mut Collection,
        rng: &mut R,
    ) -> Result<Vec<Draw>> {
        let draws = self.draw(rng)?;

        for draw in &draws {
            collection.count_at(&draw.expansion, &draw.border, &draw.card)?;
        }
        for draw in &draws {
            collection.increment(&draw.expansion, &draw.border, &draw.card)?;
        }

        Ok(draws)
    }

    /// Which variants of `expansion` this pack can ever produce.
    pub fn reachability(&self, expansion: &Expansion) -> Result<Reachability> {
        Reachability::analyze(self.resolver.definitions(), &self.def, expansion.definition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedSource, ScriptedSource, SimError, SimRng, ROLL_DOMAIN};
    use crate::defs::{CardDefinition, ExpansionDefinition, MemorySource};

    fn defs() -> Definitions {
        Definitions::in_memory(
            MemorySource::new()
                .with_card(CardDefinition::new("base_common", "base_common").with_border("base", 100.0))
                .with_card(CardDefinition::new("ghost", "ghost").with_border("base", 100.0))
                .with_expansion(ExpansionDefinition::new("base_common", ["Piggy", "Burpig"], ["base"]))
                .with_expansion(ExpansionDefinition::new("ghost", ["Boo"], ["base"]))
                .with_pack(PackDefinition::new("base_common").with_fixed("base_common", 3))
                .with_pack(
                    PackDefinition::new("lucky")
                        .with_fixed("base_common", 1)
                        .with_chances("bonus", [("ghost", 50.0), ("base_common", 50.0)]),
                ),
        )
    }

    fn registered(defs: &Definitions, names: &[&str]) -> Collection {
        let mut collection = Collection::new();
        for name in names {
            Expansion::load(defs, name).unwrap().register(&mut collection);
        }
        collection
    }

    #[test]
    fn test_fixed_slot_draws_count_times() {
        let defs = defs();
        let pack = Pack::load(&defs, "base_common").unwrap();
        let mut collection = registered(&defs, &["base_common"]);

        let draws = pack.open(&mut collection, &mut SimRng::new(3)).unwrap();

        assert_eq!(draws.len(), 3);
        assert_eq!(collection.total_cards(), 3);
    }

    #[test]
    fn test_chance_entries_are_independent() {
        let defs = defs();
        let pack = Pack::load(&defs, "lucky").unwrap();
        let mut collection = registered(&defs, &["base_common", "ghost"]);

        // Zero hits every roll: fixed draw, then both chance entries.
        let draws = pack.open(&mut collection, &mut FixedSource::new(0)).unwrap();

        let expansions: Vec<_> = draws.iter().map(|d| d.expansion.as_str()).collect();
        assert_eq!(expansions, vec!["base_common", "ghost", "base_common"]);
    }

    #[test]
    fn test_chance_entries_can_all_miss() {
        let defs = defs();
        let pack = Pack::load(&defs, "lucky").unwrap();
        let mut collection = registered(&defs, &["base_common", "ghost"]);

        // fixed draw: foil, border, card; then two missed chance rolls
        let mut rng = ScriptedSource::new([0, 0, 0, 9_999, 9_999]);
        let draws = pack.open(&mut collection, &mut rng).unwrap();

        assert_eq!(draws.len(), 1);
        assert_eq!(
            rng.requested_bounds(),
            &[ROLL_DOMAIN, ROLL_DOMAIN, 2, ROLL_DOMAIN, ROLL_DOMAIN]
        );
    }

    #[test]
    fn test_unregistered_expansion_leaves_collection_untouched() {
        let defs = defs();
        let pack = Pack::load(&defs, "lucky").unwrap();
        let mut collection = registered(&defs, &["base_common"]);
        let before = collection.clone();

        let err = pack.open(&mut collection, &mut FixedSource::new(0)).unwrap_err();

        assert!(matches!(err, SimError::NotRegistered { ref expansion, .. } if expansion == "ghost"));
        assert_eq!(collection, before);
    }

    #[test]
    fn test_missing_pack_fails_to_load() {
        let defs = defs();
        assert!(matches!(Pack::load(&defs, "nope"), Err(SimError::Load(_))));
    }
}
