//! Owned, lazily populated definition cache.
//!
//! A `Definitions` is created once per process (or per run) and then shared
//! by reference across every trial. Each identifier is loaded on first use
//! and kept for the lifetime of the cache; nothing is ever evicted.
//!
//! ## Concurrency
//!
//! Lookups take a read lock. A miss loads the record with no lock held,
//! then inserts under the write lock with entry-or-insert: if two threads
//! race on the same identifier, the first insert wins and both get the same
//! `Arc`. Sources are static for the process lifetime, so a redundant load
//! always agrees with the stored one.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::card::CardDefinition;
use super::expansion::ExpansionDefinition;
use super::pack::PackDefinition;
use super::source::{DefinitionSource, JsonDirectory, MemorySource};
use crate::core::{DefinitionKind, LoadError};

type Table<T> = RwLock<FxHashMap<String, Arc<T>>>;

/// Shared read-mostly cache of card, expansion and pack definitions.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use tcg_sim::defs::{Definitions, ExpansionDefinition, MemorySource};
///
/// let defs = Definitions::new(
///     MemorySource::new().with_expansion(ExpansionDefinition::new("ghost", ["Boo"], ["base"])),
/// );
///
/// let first = defs.expansion("ghost").unwrap();
/// let again = defs.expansion("ghost").unwrap();
/// assert!(Arc::ptr_eq(&first, &again));
/// ```
pub struct Definitions {
    source: Box<dyn DefinitionSource>,
    cards: Table<CardDefinition>,
    expansions: Table<ExpansionDefinition>,
    packs: Table<PackDefinition>,
}

impl Definitions {
    /// Create an empty cache over `source`.
    pub fn new(source: impl DefinitionSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cards: RwLock::default(),
            expansions: RwLock::default(),
            packs: RwLock::default(),
        }
    }

    /// Cache over a JSON data directory.
    pub fn from_dir(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(JsonDirectory::new(root))
    }

    /// Cache over in-memory definitions.
    pub fn in_memory(source: MemorySource) -> Self {
        Self::new(source)
    }

    /// Card type definition, loading it on first use.
    pub fn card(&self, id: &str) -> Result<Arc<CardDefinition>, LoadError> {
        get_or_load(&self.cards, DefinitionKind::Card, id, |id| {
            self.source.load_card(id)
        })
    }

    /// Expansion definition, loading it on first use.
    pub fn expansion(&self, id: &str) -> Result<Arc<ExpansionDefinition>, LoadError> {
        get_or_load(&self.expansions, DefinitionKind::Expansion, id, |id| {
            self.source.load_expansion(id)
        })
    }

    /// Pack definition, loading it on first use.
    pub fn pack(&self, id: &str) -> Result<Arc<PackDefinition>, LoadError> {
        get_or_load(&self.packs, DefinitionKind::Pack, id, |id| {
            self.source.load_pack(id)
        })
    }

    /// Load a pack and every card type and expansion it can reach.
    ///
    /// Surfaces configuration errors before a run starts instead of in the
    /// middle of a trial.
    pub fn warm_pack(&self, id: &str) -> Result<(), LoadError> {
        self.reachable_expansions(id).map(drop)
    }

    /// Every expansion a pack's slots can draw from, in slot order without
    /// duplicates. Loads the pack, its card types and those expansions.
    ///
    /// A collection must register all of them before the pack is opened
    /// into it.
    pub fn reachable_expansions(&self, id: &str) -> Result<Vec<String>, LoadError> {
        let pack = self.pack(id)?;
        let mut names: Vec<String> = Vec::new();
        for slot in &pack.slots {
            for card_type in slot.card_types() {
                let card = self.card(card_type)?;
                self.expansion(&card.expansion)?;
                if !names.contains(&card.expansion) {
                    names.push(card.expansion.clone());
                }
            }
        }
        Ok(names)
    }

    /// Number of cached definitions of each kind: (cards, expansions, packs).
    #[must_use]
    pub fn cached_counts(&self) -> (usize, usize, usize) {
        (
            self.cards.read().len(),
            self.expansions.read().len(),
            self.packs.read().len(),
        )
    }
}

impl std::fmt::Debug for Definitions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (cards, expansions, packs) = self.cached_counts();
        f.debug_struct("Definitions")
            .field("cards", &cards)
            .field("expansions", &expansions)
            .field("packs", &packs)
            .finish_non_exhaustive()
    }
}

fn get_or_load<T, F>(
    table: &Table<T>,
    kind: DefinitionKind,
    id: &str,
    load: F,
) -> Result<Arc<T>, LoadError>
where
    F: FnOnce(&str) -> Result<T, LoadError>,
{
    if let Some(found) = table.read().get(id) {
        return Ok(Arc::clone(found));
    }

    let loaded = Arc::new(load(id)?);
    tracing::debug!(%kind, id, "loaded definition");

    let mut guard = table.write();
    let entry = guard.entry(id.to_string()).or_insert(loaded);
    Ok(Arc::clone(entry))
}
