//! Property tests for rolls, resolution and collection invariants.

use proptest::prelude::*;

use tcg_sim::core::{Chance, FixedSource, ScriptedSource, ROLL_DOMAIN};
use tcg_sim::defs::{CardDefinition, ExpansionDefinition};
use tcg_sim::draw::{resolve_card, Expansion};
use tcg_sim::Collection;

fn expansion(cards: usize, borders: usize) -> ExpansionDefinition {
    ExpansionDefinition::new(
        "base_common",
        (0..cards).map(|i| format!("card{i}")),
        (0..borders).map(|i| format!("border{i}")),
    )
}

// =============================================================================
// Bernoulli Rolls
// =============================================================================

proptest! {
    #[test]
    fn roll_matches_threshold(hundredths in 0u32..=10_000, draw in 0u32..ROLL_DOMAIN) {
        let chance = Chance::from_percent(f64::from(hundredths) / 100.0);
        let hit = chance.roll(&mut FixedSource::new(draw));
        prop_assert_eq!(hit, draw < hundredths);
    }

    #[test]
    fn zero_never_and_hundred_always(draw in 0u32..ROLL_DOMAIN) {
        prop_assert!(!Chance::from_percent(0.0).roll(&mut FixedSource::new(draw)));
        prop_assert!(Chance::from_percent(100.0).roll(&mut FixedSource::new(draw)));
    }
}

// =============================================================================
// Resolution
// =============================================================================

proptest! {
    #[test]
    fn first_successful_border_wins(
        thresholds in proptest::collection::vec(0u32..=10_000, 1..6),
        draws in proptest::collection::vec(0u32..ROLL_DOMAIN, 6),
    ) {
        let mut card = CardDefinition::new("base_common", "base_common");
        for (i, t) in thresholds.iter().enumerate() {
            card = card.with_border(format!("border{i}"), f64::from(*t) / 100.0);
        }
        let exp = expansion(3, thresholds.len());

        let expected = thresholds
            .iter()
            .zip(&draws)
            .position(|(t, d)| d < t);

        // foil roll, border rolls up to the first success, then the card index
        let mut script = vec![ROLL_DOMAIN - 1];
        match expected {
            Some(i) => {
                script.extend(&draws[..=i]);
                script.push(0);
            }
            None => script.extend(&draws[..thresholds.len()]),
        }
        let mut rng = ScriptedSource::new(script);

        match (resolve_card(&card, &exp, &mut rng), expected) {
            (Ok(draw), Some(i)) => {
                prop_assert_eq!(draw.border, format!("border{i}"));
                prop_assert!(!draw.foil);
                prop_assert_eq!(draw.card, "card0");
            }
            (Err(_), None) => {}
            (got, want) => prop_assert!(false, "got {:?}, expected border {:?}", got, want),
        }
    }
}

// =============================================================================
// Collection Invariants
// =============================================================================

proptest! {
    #[test]
    fn collected_count_bounded_by_total(
        cards in 1usize..5,
        borders in 1usize..4,
        hits in proptest::collection::vec((0usize..5, 0usize..8), 0..40),
    ) {
        let def = expansion(cards, borders);
        let exp = Expansion::from_definition(def.clone().into());
        let mut collection = Collection::new();
        exp.register(&mut collection);

        let keys: Vec<String> = def.variant_borders().map(str::to_string).collect();
        for (card, border) in hits {
            let card = format!("card{}", card % cards);
            let border = &keys[border % keys.len()];
            let before = collection.count_at("base_common", border, &card).unwrap();
            let after = collection.increment("base_common", border, &card).unwrap();
            prop_assert_eq!(after, before + 1);
        }

        let collected = exp.collected_count(&collection).unwrap();
        prop_assert!(collected <= exp.total_variants());
        prop_assert_eq!(
            collected == exp.total_variants(),
            exp.is_complete(&collection).unwrap()
        );
    }

    #[test]
    fn register_is_idempotent(
        cards in 1usize..5,
        borders in 1usize..4,
        hits in proptest::collection::vec(0usize..5, 0..10),
    ) {
        let def = expansion(cards, borders);
        let mut collection = Collection::new();
        collection.register(&def);
        for card in hits {
            collection.increment("base_common", "border0", &format!("card{}", card % cards)).unwrap();
        }

        let once = collection.clone();
        collection.register(&def);
        prop_assert_eq!(collection, once);
    }
}
