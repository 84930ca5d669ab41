//! Static reachability of expansion variants.
//!
//! `complete_expansion` has no iteration cap: if some variant of the target
//! expansion can never be drawn from the chosen pack, the loop never ends.
//! This analysis finds such variants up front from the definitions alone,
//! so drivers can warn about it. It never changes simulation behaviour.
//!
//! A card type contributes to an expansion only if the pack can draw it at
//! all (fixed count above zero, or chance above zero) and it targets that
//! expansion. For such a card type:
//!
//! - plain variants are reachable unless foil is certain,
//! - foil variants are reachable unless foil is impossible,
//! - border `i` is reachable if its chance is above zero and no earlier
//!   entry always succeeds.
//!
//! Card names are drawn uniformly, so a reachable border key reaches every
//! card of the expansion.

use rustc_hash::FxHashSet;

use crate::core::Result;
use crate::defs::{Definitions, ExpansionDefinition, PackDefinition, Slot};

/// Which border keys of an expansion a pack can produce.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reachability {
    /// Expansion analysed.
    pub expansion: String,
    /// Pack analysed.
    pub pack: String,
    /// Border keys (plain and foil) the pack can produce, expansion order.
    pub reachable: Vec<String>,
    /// Border keys the pack can never produce, expansion order.
    pub unreachable: Vec<String>,
    /// Border keys the pack produces for this expansion that the expansion
    /// does not define. Opening such a pack eventually fails with
    /// not-registered.
    pub undefined: Vec<String>,
}

impl Reachability {
    /// Analyse `pack` against `expansion`, loading card types through `defs`.
    pub fn analyze(
        defs: &Definitions,
        pack: &PackDefinition,
        expansion: &ExpansionDefinition,
    ) -> Result<Self> {
        let mut produced: FxHashSet<String> = FxHashSet::default();

        for slot in &pack.slots {
            let drawable: Vec<&str> = match slot {
                Slot::Fixed { card_type, count } if *count > 0 => vec![card_type.as_str()],
                Slot::Fixed { .. } => Vec::new(),
                Slot::Chance { entries, .. } => entries
                    .iter()
                    .filter(|(_, chance)| !chance.is_impossible())
                    .map(|(card_type, _)| card_type.as_str())
                    .collect(),
            };

            for card_type in drawable {
                let card = defs.card(card_type)?;
                if card.expansion != expansion.name() || expansion.cards().is_empty() {
                    continue;
                }
                let plain = !card.foil_chance.is_certain();
                let foil = !card.foil_chance.is_impossible();

                for border in &card.borders {
                    if !border.chance.is_impossible() {
                        if plain {
                            produced.insert(border.name.clone());
                        }
                        if foil {
                            produced.insert(border.foil_name.clone());
                        }
                    }
                    if border.chance.is_certain() {
                        break;
                    }
                }
            }
        }

        let (reachable, unreachable): (Vec<String>, Vec<String>) = expansion
            .variant_borders()
            .map(str::to_string)
            .partition(|border| produced.contains(border));

        let mut undefined: Vec<String> = produced
            .into_iter()
            .filter(|border| !expansion.variant_borders().any(|b| b == border))
            .collect();
        undefined.sort();

        Ok(Self {
            expansion: expansion.name().to_string(),
            pack: pack.name.clone(),
            reachable,
            unreachable,
            undefined,
        })
    }

    /// True if opening the pack can eventually complete the expansion.
    #[must_use]
    pub fn is_completable(&self) -> bool {
        self.unreachable.is_empty()
    }
}

/// Analyse a pack against an expansion by identifier.
pub fn audit(defs: &Definitions, pack: &str, expansion: &str) -> Result<Reachability> {
    let pack = defs.pack(pack)?;
    let expansion = defs.expansion(expansion)?;
    Reachability::analyze(defs, &pack, &expansion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{CardDefinition, MemorySource};

    fn defs(card: CardDefinition, pack: PackDefinition) -> Definitions {
        Definitions::in_memory(
            MemorySource::new()
                .with_card(card)
                .with_expansion(ExpansionDefinition::new("base_common", ["Piggy"], ["gold", "base"]))
                .with_pack(pack),
        )
    }

    #[test]
    fn test_everything_reachable() {
        let card = CardDefinition::new("c", "base_common")
            .with_foil_chance(5.0)
            .with_border("gold", 1.0)
            .with_border("base", 100.0);
        let defs = defs(card, PackDefinition::new("p").with_fixed("c", 1));

        let report = audit(&defs, "p", "base_common").unwrap();
        assert!(report.is_completable());
        assert_eq!(report.reachable, vec!["gold", "gold_foil", "base", "base_foil"]);
        assert!(report.undefined.is_empty());
    }

    #[test]
    fn test_zero_foil_makes_foil_unreachable() {
        let card = CardDefinition::new("c", "base_common")
            .with_border("gold", 1.0)
            .with_border("base", 100.0);
        let defs = defs(card, PackDefinition::new("p").with_fixed("c", 2));

        let report = audit(&defs, "p", "base_common").unwrap();
        assert!(!report.is_completable());
        assert_eq!(report.unreachable, vec!["gold_foil", "base_foil"]);
    }

    #[test]
    fn test_certain_entry_shadows_later_borders() {
        let card = CardDefinition::new("c", "base_common")
            .with_foil_chance(50.0)
            .with_border("base", 100.0)
            .with_border("gold", 100.0);
        let defs = defs(card, PackDefinition::new("p").with_fixed("c", 1));

        let report = audit(&defs, "p", "base_common").unwrap();
        assert_eq!(report.unreachable, vec!["gold", "gold_foil"]);
    }

    #[test]
    fn test_zero_count_and_zero_chance_slots_draw_nothing() {
        let card = CardDefinition::new("c", "base_common")
            .with_foil_chance(50.0)
            .with_border("base", 100.0);
        let pack = PackDefinition::new("p")
            .with_fixed("c", 0)
            .with_chances("never", [("c", 0.0)]);
        let defs = defs(card, pack);

        let report = audit(&defs, "p", "base_common").unwrap();
        assert!(report.reachable.is_empty());
        assert_eq!(report.unreachable.len(), 4);
    }

    #[test]
    fn test_undefined_border_keys_are_listed() {
        let card = CardDefinition::new("c", "base_common")
            .with_foil_chance(100.0)
            .with_border("silver", 10.0)
            .with_border("base", 100.0);
        let defs = defs(card, PackDefinition::new("p").with_fixed("c", 1));

        let report = audit(&defs, "p", "base_common").unwrap();
        assert_eq!(report.undefined, vec!["silver_foil"]);
        assert_eq!(report.reachable, vec!["base_foil"]);
    }
}
