//! Expansion completion model.

use std::sync::Arc;

use crate::collection::Collection;
use crate::core::Result;
use crate::defs::{Definitions, ExpansionDefinition};

/// An expansion as a completion target.
///
/// Wraps the shared definition; cheap to clone.
#[derive(Clone, Debug)]
pub struct Expansion {
    def: Arc<ExpansionDefinition>,
}

impl Expansion {
    /// Load an expansion through the definition cache.
    pub fn load(defs: &Definitions, id: &str) -> Result<Self> {
        Ok(Self::from_definition(defs.expansion(id)?))
    }

    #[must_use]
    pub fn from_definition(def: Arc<ExpansionDefinition>) -> Self {
        Self { def }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name()
    }

    #[must_use]
    pub fn definition(&self) -> &ExpansionDefinition {
        &self.def
    }

    /// Number of collectible variants: cards × borders × 2.
    #[must_use]
    pub fn total_variants(&self) -> usize {
        self.def.total_variants()
    }

    /// Register this expansion's variants in `collection`.
    pub fn register(&self, collection: &mut Collection) {
        collection.register(&self.def);
    }

    /// Number of distinct variants owned at least once.
    ///
    /// Duplicates of a variant count once. Fails with not-registered if the
    /// expansion, or any of its border or card entries, is missing.
    pub fn collected_count(&self, collection: &Collection) -> Result<usize> {
        let mut collected = 0;
        for (plain, foil) in self.def.border_pairs() {
            for card in self.def.cards() {
                if collection.count_at(self.name(), plain, card)? > 0 {
                    collected += 1;
                }
                if collection.count_at(self.name(), foil, card)? > 0 {
                    collected += 1;
                }
            }
        }
        Ok(collected)
    }

    /// True once every variant has been collected.
    pub fn is_complete(&self, collection: &Collection) -> Result<bool> {
        Ok(self.collected_count(collection)? >= self.total_variants())
    }

    /// Variants not yet owned, as (border key, card) pairs in collection
    /// order.
    pub fn missing_variants(&self, collection: &Collection) -> Result<Vec<(String, String)>> {
        let mut missing = Vec::new();
        for border in self.def.variant_borders() {
            for card in self.def.cards() {
                if collection.count_at(self.name(), border, card)? == 0 {
                    missing.push((border.to_string(), card.clone()));
                }
            }
        }
        Ok(missing)
    }
}

impl From<Arc<ExpansionDefinition>> for Expansion {
    fn from(def: Arc<ExpansionDefinition>) -> Self {
        Self::from_definition(def)
    }
}
